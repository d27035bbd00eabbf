//! End-to-end pipeline from an image directory to a synthesized image
//!
//! Extraction runs in one of two modes. Bulk mode decodes the corpus once and
//! fits coordinates in parallel over the shared read-only stack. Per-pixel mode
//! rescans the directory for every coordinate and keeps only one sample in
//! memory at a time.

use crate::algorithm::model::PixelModel;
use crate::algorithm::synthesis::{ImageSynthesizer, ModelGrid, SyntheticImage};
use crate::analysis::extraction::{extract, extract_all_from_files};
use crate::analysis::fitting::{DistributionFitter, FitConfig, FitReport, ModelFamily};
use crate::io::configuration::{DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH};
use crate::io::corpus::corpus_files;
use crate::io::error::Result;
use crate::io::progress::ProgressManager;
use crate::spatial::{Coordinate, Dimensions, Grid};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// How per-coordinate samples are gathered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Decode every image once and keep the whole corpus in memory
    #[default]
    Bulk,
    /// Rescan and decode the corpus separately for each coordinate
    PerPixel,
}

/// Parameters of one synthesis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    /// Raster every image is resized to, and the size of the output
    pub dimensions: Dimensions,
    /// Sample extraction strategy
    pub mode: ExtractionMode,
    /// Model selection and estimation parameters
    pub fit: FitConfig,
    /// Seed of the synthesis random generator
    pub seed: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
            },
            mode: ExtractionMode::default(),
            fit: FitConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Model family counts for a fitted grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitSummary {
    /// Coordinates fitted with a Normal model
    pub normal: usize,
    /// Coordinates fitted with a Uniform model
    pub uniform: usize,
}

impl FitSummary {
    /// Count one fitted coordinate
    pub const fn record(&mut self, report: &FitReport) {
        match report.model.family() {
            ModelFamily::Normal => self.normal += 1,
            ModelFamily::Uniform => self.uniform += 1,
        }
    }

    /// Total number of fitted coordinates
    pub const fn total(&self) -> usize {
        self.normal + self.uniform
    }
}

/// Fits pixel models for an image directory and synthesizes images from them
#[derive(Debug, Clone)]
pub struct CorpusSynthesizer {
    directory: PathBuf,
    config: SynthesisConfig,
    fitter: DistributionFitter,
}

impl CorpusSynthesizer {
    /// Create a synthesizer over the images in `directory`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the fit configuration is invalid
    pub fn new(directory: impl Into<PathBuf>, config: SynthesisConfig) -> Result<Self> {
        let fitter = DistributionFitter::new(config.fit)?;
        Ok(Self {
            directory: directory.into(),
            config,
            fitter,
        })
    }

    /// Corpus directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Run configuration
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Fit the model of a single coordinate with a dedicated directory scan
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The coordinate lies outside the configured dimensions
    /// - No image in the corpus could be decoded
    pub fn fit_pixel(&self, coordinate: Coordinate) -> Result<(PixelModel, FitReport)> {
        let sample = extract(&self.directory, coordinate, self.config.dimensions)?;
        PixelModel::fit(coordinate, &sample, &self.fitter)
    }

    /// Fit a model for every coordinate
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate has an empty sample, which happens
    /// when the corpus holds no decodable image
    pub fn fit_models(
        &self,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<(ModelGrid, FitSummary)> {
        let dimensions = self.config.dimensions;
        info!(
            "Fitting {dimensions} pixel models from {} ({:?} extraction)",
            self.directory.display(),
            self.config.mode
        );

        let fitted = match self.config.mode {
            ExtractionMode::Bulk => self.fit_bulk(progress.as_deref_mut())?,
            ExtractionMode::PerPixel => self.fit_per_pixel(progress.as_deref_mut())?,
        };

        if let Some(pm) = progress {
            pm.finish_phase();
        }

        let mut summary = FitSummary::default();
        let mut models = Vec::with_capacity(fitted.len());
        for (model, report) in fitted {
            summary.record(&report);
            models.push(model);
        }

        info!(
            "Fitted {} Normal and {} Uniform models",
            summary.normal, summary.uniform
        );
        Ok((Grid::from_row_major(dimensions, models)?, summary))
    }

    fn fit_bulk(
        &self,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<Vec<(PixelModel, FitReport)>> {
        let dimensions = self.config.dimensions;
        let files = corpus_files(&self.directory);

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_phase("Decoding", files.len());
        }
        let samples = extract_all_from_files(&files, dimensions, |_| {
            if let Some(pm) = progress.as_deref() {
                pm.advance(1);
            }
        })?;

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_phase("Fitting", dimensions.pixel_count());
        }
        let shared_progress = progress.as_deref();

        let coordinates: Vec<Coordinate> = dimensions.coordinates().collect();
        coordinates
            .par_iter()
            .map(|&coordinate| {
                let sample = samples.sample(coordinate)?;
                let fitted = PixelModel::fit(coordinate, &sample, &self.fitter);
                if let Some(pm) = shared_progress {
                    pm.advance(1);
                }
                fitted
            })
            .collect()
    }

    fn fit_per_pixel(
        &self,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<Vec<(PixelModel, FitReport)>> {
        let dimensions = self.config.dimensions;

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_phase("Fitting", dimensions.pixel_count());
        }

        let mut fitted = Vec::with_capacity(dimensions.pixel_count());
        for coordinate in dimensions.coordinates() {
            fitted.push(self.fit_pixel(coordinate)?);
            if let Some(pm) = progress.as_deref() {
                pm.advance(1);
            }
        }
        Ok(fitted)
    }

    /// Fit every coordinate and draw one synthetic image with the configured seed
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails for any coordinate
    pub fn synthesize(
        &self,
        progress: Option<&mut ProgressManager>,
    ) -> Result<(SyntheticImage, FitSummary)> {
        let (models, summary) = self.fit_models(progress)?;
        let dimensions = self.config.dimensions;
        let image = ImageSynthesizer::from_seed(self.config.seed).synthesize(
            &models,
            dimensions.width,
            dimensions.height,
        )?;
        Ok((image, summary))
    }
}
