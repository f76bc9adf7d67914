use anyhow::Context;
use bayer_lab_rs::image_pipeline::{
    BayerPattern, GreenSelection, PipelineConfig, RawImageData, RawToLabPipeline, WhiteBalance,
};
use bayer_lab_rs::logger;

use tracing::{error, info};

/// Horizontal and vertical ramps behind an RGGB filter, tinted warm.
fn synthetic_mosaic(width: usize, height: usize, bits: u32) -> RawImageData {
    let max = (1usize << bits) - 1;
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let base = col * max / width / 2 + row * max / height / 4;
            let tint = match (row & 1, col & 1) {
                (0, 0) => base + base / 4,
                (1, 1) => base - base / 4,
                _ => base,
            };
            data.push(tint.min(max) as u16);
        }
    }
    RawImageData {
        width,
        height,
        data,
        bits_per_sample: bits,
        pattern: BayerPattern::Rggb,
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting bayer_lab...");

    let config = PipelineConfig::builder()
        .white_balance(WhiteBalance::new(0.8, 1.0, 1.25))
        .green_selection(GreenSelection::LowerGradient)
        .build();
    let pipeline = RawToLabPipeline::new(config).context("building pipeline")?;

    info!("RAW to Lab pipeline initialized");
    info!("White balance: {:?}", pipeline.config().white_balance);
    info!("Green selection: {:?}", pipeline.config().green_selection);

    let raw = synthetic_mosaic(1024, 768, 14);
    match pipeline.convert_with_timings(&raw) {
        Ok((lab, timings)) => {
            timings.log_summary();
            let (h, w) = (lab.height, lab.width);
            for (row, col) in [(0, 0), (h / 2, w / 2), (h - 1, w - 1)] {
                let (l, a, b) = lab.pixel(row, col);
                info!(row, col, l, a, b, "Lab sample");
            }
        }
        Err(e) => error!("Conversion failed: {}", e),
    }

    let preview = RawToLabPipeline::new(PipelineConfig::builder().preview_skip(Some(4)).build())?;
    let small = preview.convert(&raw).context("preview conversion")?;
    info!(width = small.width, height = small.height, "Preview complete");

    Ok(())
}
