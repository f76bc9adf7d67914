#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::image_pipeline::colorspace::{ColorMatrix, LabConverter, LabTable};
    use crate::image_pipeline::common::error::DemosaicError;
    use crate::image_pipeline::config::{GreenSelection, PipelineConfig};
    use crate::image_pipeline::conversions::RawToLabPipeline;
    use crate::image_pipeline::debayer::WhiteBalance;
    use crate::image_pipeline::raw::{BayerPattern, RawImageData};

    fn flat(width: usize, height: usize, value: u16, bits: u32) -> RawImageData {
        RawImageData {
            width,
            height,
            data: vec![value; width * height],
            bits_per_sample: bits,
            pattern: BayerPattern::Rggb,
        }
    }

    fn gray_lab(v: u16) -> (i16, i16, i16) {
        let converter = LabConverter::with_matrix(ColorMatrix::srgb_d65());
        let (mut l, mut a, mut b) = ([0i16], [0i16], [0i16]);
        converter.convert_row(&[v], &[v], &[v], &mut l, &mut a, &mut b);
        (l[0], a[0], b[0])
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .green_selection(GreenSelection::Average)
            .preview_skip(Some(4))
            .threads(Some(2))
            .validate_dimensions(false)
            .max_dimension(Some(10000))
            .build();

        assert_eq!(config.green_selection, GreenSelection::Average);
        assert_eq!(config.preview_skip, Some(4));
        assert_eq!(config.threads, Some(2));
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(10000));
        assert!(config.white_balance.is_identity());
    }

    #[test]
    fn test_flat_field_converts_to_uniform_lab() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let lab = pipeline.convert(&flat(8, 6, 20000, 16)).unwrap();

        assert_eq!((lab.width, lab.height), (8, 6));
        let expected = gray_lab(20000);
        for row in 0..6 {
            for col in 0..8 {
                assert_eq!(lab.pixel(row, col), expected, "pixel ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_twelve_bit_samples_scaled_to_full_range() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let rgb = pipeline.debayer(&flat(6, 6, 4095, 12)).unwrap();
        assert!(rgb.r.iter().chain(&rgb.g).chain(&rgb.b).all(|&v| v == 65535));

        let lab = pipeline.convert(&flat(6, 6, 4095, 12)).unwrap();
        assert_eq!(lab.pixel(3, 3).0, 300);
    }

    #[test]
    fn test_invalid_bit_depth() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        for bits in [0, 17] {
            let result = pipeline.convert(&flat(4, 4, 0, bits));
            assert!(matches!(result, Err(DemosaicError::InvalidBitDepth(b)) if b == bits));
        }
    }

    #[test]
    fn test_dimension_validation() {
        let config = PipelineConfig::builder().max_dimension(Some(16)).build();
        let pipeline = RawToLabPipeline::new(config).unwrap();

        assert!(matches!(
            pipeline.convert(&flat(2, 8, 0, 16)),
            Err(DemosaicError::InvalidDimensions(2, 8))
        ));
        assert!(matches!(
            pipeline.convert(&flat(20, 8, 0, 16)),
            Err(DemosaicError::InvalidDimensions(20, 8))
        ));
        assert!(pipeline.convert(&flat(16, 8, 0, 16)).is_ok());
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let config = PipelineConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(4))
            .build();
        let pipeline = RawToLabPipeline::new(config).unwrap();
        assert!(pipeline.convert(&flat(8, 8, 100, 16)).is_ok());
        // The demosaic kernels still need a 3x3 neighbourhood.
        assert!(matches!(
            pipeline.convert(&flat(2, 2, 100, 16)),
            Err(DemosaicError::InvalidDimensions(2, 2))
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let mut raw = flat(4, 4, 0, 16);
        raw.data.pop();
        assert!(matches!(
            pipeline.convert(&raw),
            Err(DemosaicError::BufferSizeMismatch { expected: 16, got: 15 })
        ));
    }

    #[test]
    fn test_timings_cover_each_stage() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let (_, timings) = pipeline.convert_with_timings(&flat(8, 8, 1000, 16)).unwrap();

        for step in ["validate_dimensions", "normalize_samples", "debayer", "lab"] {
            assert!(timings.get_step(step).is_some(), "missing step {step}");
        }
        assert_eq!(timings.steps().len(), 4);
    }

    #[test]
    fn test_preview_output_size() {
        let config = PipelineConfig::builder().preview_skip(Some(2)).build();
        let pipeline = RawToLabPipeline::new(config).unwrap();
        let lab = pipeline.convert(&flat(9, 7, 20000, 16)).unwrap();

        assert_eq!((lab.width, lab.height), (5, 4));
        assert_eq!(lab.pixel(1, 1), gray_lab(20000));
    }

    #[test]
    fn test_yiq_of_gray_has_no_chroma() {
        let pipeline = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let yiq = pipeline.convert_to_yiq(&flat(6, 6, 12000, 16)).unwrap();

        assert!(yiq.y.iter().all(|&y| y == 12_000_000));
        assert!(yiq.i.iter().chain(&yiq.q).all(|&c| c == 0));
    }

    #[test]
    fn test_dedicated_thread_pool_matches_global() {
        let raw = RawImageData {
            width: 12,
            height: 10,
            data: (0..120).map(|k| (k * 431 % 65536) as u16).collect(),
            bits_per_sample: 16,
            pattern: BayerPattern::Gbrg,
        };
        let global = RawToLabPipeline::new(PipelineConfig::default()).unwrap();
        let pooled_config = PipelineConfig::builder().threads(Some(2)).build();
        let pooled = RawToLabPipeline::new(pooled_config).unwrap();

        let a = global.convert(&raw).unwrap();
        let b = pooled.convert(&raw).unwrap();
        assert_eq!((a.l, a.a, a.b), (b.l, b.a, b.b));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let bad_wb = PipelineConfig::builder()
            .white_balance(WhiteBalance::new(1.0, -1.0, 1.0))
            .build();
        assert!(matches!(
            RawToLabPipeline::new(bad_wb),
            Err(DemosaicError::InvalidMultiplier(_, _))
        ));

        let zero_skip = PipelineConfig::builder().preview_skip(Some(0)).build();
        assert!(matches!(
            RawToLabPipeline::new(zero_skip),
            Err(DemosaicError::InvalidPreviewSkip(0))
        ));
    }

    #[test]
    fn test_set_config_keeps_table() {
        let table = Arc::new(LabTable::new());
        let mut pipeline =
            RawToLabPipeline::with_table(PipelineConfig::default(), Arc::clone(&table)).unwrap();

        let config = PipelineConfig::builder().preview_skip(Some(3)).build();
        pipeline.set_config(config).unwrap();
        assert_eq!(pipeline.config().preview_skip, Some(3));

        let rejected = PipelineConfig::builder()
            .white_balance(WhiteBalance::new(0.0, 1.0, 1.0))
            .build();
        assert!(pipeline.set_config(rejected).is_err());
        assert_eq!(pipeline.config().preview_skip, Some(3));
        assert_eq!(Arc::strong_count(&table), 2);
    }
}
