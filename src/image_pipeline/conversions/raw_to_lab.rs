use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    colorspace::{LabConverter, LabImageData, LabTable, YiqImageData, rgb_to_yiq_image},
    common::{
        MAXVAL, PipelineTimings, Timer, WorkerPool, clip_bits,
        error::{DemosaicError, Result},
        max_value,
    },
    config::PipelineConfig,
    debayer::{CpuDebayer, RgbImageData},
    raw::{RawImageData, RawPlane},
};

/// Raw Bayer mosaic to demosaiced RGB and on to fixed-point Lab.
pub struct RawToLabPipeline {
    config: PipelineConfig,
    debayer: CpuDebayer,
    lab: LabConverter,
    pool: WorkerPool,
}

impl RawToLabPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_table(config, LabTable::shared())
    }

    /// Pipeline converting through a caller-owned Lab table.
    pub fn with_table(config: PipelineConfig, table: Arc<LabTable>) -> Result<Self> {
        config.validate()?;
        let debayer = CpuDebayer::from_config(&config)?;
        let pool = WorkerPool::new(config.threads)?;
        let lab = LabConverter::new(config.color_matrix, table);
        debug!(threads = pool.current_num_threads(), "pipeline ready");
        Ok(Self {
            config,
            debayer,
            lab,
            pool,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width < 3 || height < 3 {
            return Err(DemosaicError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(DemosaicError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Samples rescaled from the sensor bit depth to the full 16-bit range.
    fn normalized_samples<'a>(&self, raw: &'a RawImageData) -> Result<Cow<'a, [u16]>> {
        let bits = raw.bits_per_sample;
        if !(1..=16).contains(&bits) {
            return Err(DemosaicError::InvalidBitDepth(bits));
        }
        if bits == 16 {
            return Ok(Cow::Borrowed(&raw.data));
        }
        let max = max_value(bits) as u32;
        debug!(bits, "scaling samples to 16 bits");
        Ok(Cow::Owned(
            raw.data
                .iter()
                .map(|&v| (clip_bits(v as i32, bits) as u32 * MAXVAL as u32 / max) as u16)
                .collect(),
        ))
    }

    fn debayer_timed(
        &self,
        raw: &RawImageData,
        timings: &mut PipelineTimings,
    ) -> Result<RgbImageData> {
        let timer = Timer::start("validate_dimensions");
        self.validate_dimensions(raw.width, raw.height)?;
        timings.record(timer);

        let timer = Timer::start("normalize_samples");
        let samples = self.normalized_samples(raw)?;
        let plane = RawPlane::new(&samples, raw.width, raw.height, raw.pattern)?;
        timings.record(timer);

        let timer = Timer::start("debayer");
        let rgb = {
            let _span = tracing::info_span!("debayer", pattern = %raw.pattern).entered();
            self.pool.install(|| self.debayer.process(&plane))?
        };
        timings.record(timer);
        Ok(rgb)
    }

    /// Demosaic only.
    #[instrument(skip(self, raw), fields(width = raw.width, height = raw.height))]
    pub fn debayer(&self, raw: &RawImageData) -> Result<RgbImageData> {
        self.debayer_timed(raw, &mut PipelineTimings::new())
    }

    #[instrument(skip(self, raw), fields(width = raw.width, height = raw.height))]
    pub fn convert(&self, raw: &RawImageData) -> Result<LabImageData> {
        let (lab, timings) = self.convert_with_timings(raw)?;
        info!(
            width = lab.width,
            height = lab.height,
            ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok(lab)
    }

    pub fn convert_with_timings(
        &self,
        raw: &RawImageData,
    ) -> Result<(LabImageData, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting RAW to Lab conversion");

        let rgb = self.debayer_timed(raw, &mut timings)?;

        let timer = Timer::start("lab");
        let lab = {
            let _span =
                tracing::info_span!("lab", width = rgb.width, height = rgb.height).entered();
            self.pool.install(|| self.lab.convert_image(&rgb))?
        };
        timings.record(timer);

        Ok((lab, timings))
    }

    /// Demosaic and convert to YIQ for chroma edits.
    #[instrument(skip(self, raw), fields(width = raw.width, height = raw.height))]
    pub fn convert_to_yiq(&self, raw: &RawImageData) -> Result<YiqImageData> {
        let rgb = self.debayer(raw)?;
        let _span = tracing::info_span!("yiq").entered();
        Ok(self.pool.install(|| rgb_to_yiq_image(&rgb)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) -> Result<()> {
        let table = self.lab.shared_table();
        *self = Self::with_table(config, table)?;
        Ok(())
    }
}
