//! Tests for the directory-to-image pipeline in both extraction modes

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};
    use pixelstat::SynthesisError;
    use pixelstat::algorithm::executor::{
        CorpusSynthesizer, ExtractionMode, FitSummary, SynthesisConfig,
    };
    use pixelstat::analysis::fitting::{FitConfig, FittedModel, NormalityRule};
    use pixelstat::io::progress::ProgressManager;
    use pixelstat::spatial::{Coordinate, Dimensions};
    use std::path::Path;
    use tempfile::TempDir;

    const BIMODAL: [u8; 10] = [10, 190, 12, 188, 11, 189, 13, 187, 9, 191];

    // Pixel (0, 0) carries the bimodal sample; every other pixel is constant at 50
    fn write_corpus(dir: &Path) {
        for (index, &value) in BIMODAL.iter().enumerate() {
            let image = GrayImage::from_fn(4, 4, |x, y| {
                if (x, y) == (0, 0) { Luma([value]) } else { Luma([50]) }
            });
            image
                .save(dir.join(format!("img_{index:02}.png")))
                .expect("write test image");
        }
    }

    fn config(mode: ExtractionMode) -> SynthesisConfig {
        SynthesisConfig {
            dimensions: Dimensions::new(4, 4).expect("valid dimensions"),
            mode,
            fit: FitConfig {
                rule: NormalityRule::Standard,
                ..FitConfig::default()
            },
            seed: 42,
        }
    }

    // Tests that both extraction modes fit identical models and images
    // Verified by reversing file order in bulk mode
    #[test]
    fn test_bulk_and_per_pixel_modes_agree() {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(dir.path());

        let bulk = CorpusSynthesizer::new(dir.path(), config(ExtractionMode::Bulk))
            .expect("valid configuration");
        let per_pixel = CorpusSynthesizer::new(dir.path(), config(ExtractionMode::PerPixel))
            .expect("valid configuration");

        let (bulk_models, bulk_summary) = bulk.fit_models(None).expect("decodable corpus");
        let (pixel_models, pixel_summary) =
            per_pixel.fit_models(None).expect("decodable corpus");
        assert_eq!(bulk_models, pixel_models);
        assert_eq!(bulk_summary, pixel_summary);

        let (bulk_image, _) = bulk.synthesize(None).expect("decodable corpus");
        let (pixel_image, _) = per_pixel.synthesize(None).expect("decodable corpus");
        assert_eq!(bulk_image, pixel_image);
    }

    // Tests model selection across the grid and the family counts
    // Verified by counting every model as Normal
    #[test]
    fn test_fit_models_summary() {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(dir.path());
        let synthesizer = CorpusSynthesizer::new(dir.path(), config(ExtractionMode::Bulk))
            .expect("valid configuration");

        let (models, summary) = synthesizer.fit_models(None).expect("decodable corpus");

        assert_eq!(summary.total(), 16);
        assert_eq!(summary.uniform, 16);
        assert_eq!(
            models.get(Coordinate::new(0, 0)).and_then(|m| m.model()),
            Some(&FittedModel::Uniform {
                low: 9.0,
                high: 191.0
            })
        );
        assert_eq!(
            models.get(Coordinate::new(3, 3)).and_then(|m| m.model()),
            Some(&FittedModel::Uniform {
                low: 50.0,
                high: 50.0
            })
        );
    }

    // Tests that synthesized pixels follow their own coordinate's model
    // Verified by sampling every pixel from the (0, 0) model
    #[test]
    fn test_synthesize_respects_pixel_models() {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(dir.path());
        let synthesizer = CorpusSynthesizer::new(dir.path(), config(ExtractionMode::Bulk))
            .expect("valid configuration");

        let (image, summary) = synthesizer.synthesize(None).expect("decodable corpus");

        assert_eq!(summary.total(), 16);
        let corner = image.get(Coordinate::new(0, 0)).expect("in bounds");
        assert!((9..=191).contains(&corner));
        for coordinate in Dimensions::new(4, 4).expect("valid dimensions").coordinates() {
            if coordinate != Coordinate::new(0, 0) {
                assert_eq!(image.get(coordinate), Some(50));
            }
        }
    }

    // Tests that an empty corpus is reported against a coordinate in both modes
    // Verified by substituting a default model for empty samples
    #[test]
    fn test_empty_corpus_is_insufficient_data() {
        let dir = TempDir::new().expect("temp dir");

        for mode in [ExtractionMode::Bulk, ExtractionMode::PerPixel] {
            let synthesizer =
                CorpusSynthesizer::new(dir.path(), config(mode)).expect("valid configuration");
            let result = synthesizer.fit_models(None);
            assert!(
                matches!(
                    result,
                    Err(SynthesisError::InsufficientData {
                        coordinate: Some(_)
                    })
                ),
                "{mode:?}"
            );
        }
    }

    // Tests single-pixel fitting and its bounds check
    // Verified by skipping the bounds check
    #[test]
    fn test_fit_pixel() {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(dir.path());
        let synthesizer = CorpusSynthesizer::new(dir.path(), config(ExtractionMode::PerPixel))
            .expect("valid configuration");

        let (model, report) = synthesizer
            .fit_pixel(Coordinate::new(0, 0))
            .expect("in-bounds pixel");
        assert_eq!(model.coordinate(), Coordinate::new(0, 0));
        assert_eq!(report.sample_size, 10);
        assert!(report.normality.p_value < 0.05);

        assert!(matches!(
            synthesizer.fit_pixel(Coordinate::new(4, 0)),
            Err(SynthesisError::OutOfBounds { .. })
        ));
    }

    // Tests that progress phases are opened and closed per mode
    // Verified by leaving the final phase running
    #[test]
    fn test_progress_phases() {
        let dir = TempDir::new().expect("temp dir");
        write_corpus(dir.path());

        let mut progress = ProgressManager::new();
        CorpusSynthesizer::new(dir.path(), config(ExtractionMode::Bulk))
            .expect("valid configuration")
            .fit_models(Some(&mut progress))
            .expect("decodable corpus");
        assert_eq!(progress.completed_phases(), 2);
        assert_eq!(progress.position(), None);

        let mut progress = ProgressManager::new();
        CorpusSynthesizer::new(dir.path(), config(ExtractionMode::PerPixel))
            .expect("valid configuration")
            .fit_models(Some(&mut progress))
            .expect("decodable corpus");
        assert_eq!(progress.completed_phases(), 1);
        progress.finish();
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let mut bad = config(ExtractionMode::Bulk);
        bad.fit.significance = 1.5;
        assert!(CorpusSynthesizer::new("corpus", bad).is_err());

        let synthesizer =
            CorpusSynthesizer::new("corpus", SynthesisConfig::default()).expect("defaults valid");
        assert_eq!(synthesizer.directory(), Path::new("corpus"));
        assert_eq!(synthesizer.config().mode, ExtractionMode::Bulk);
        assert_eq!(synthesizer.config().dimensions.width, 512);
        assert_eq!(FitSummary::default().total(), 0);
    }
}
