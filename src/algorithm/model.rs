//! Per-coordinate pixel models

use crate::analysis::extraction::Intensity;
use crate::analysis::fitting::{DistributionFitter, FitReport, FittedModel};
use crate::io::configuration::{MAX_INTENSITY, MIN_INTENSITY};
use crate::io::error::{Result, SynthesisError, WithCoordinate};
use crate::spatial::Coordinate;
use rand::Rng;

/// The fitted distribution of one coordinate
///
/// A model starts unfitted or is created already fitted; once fitted it never
/// changes. Sampling an unfitted model fails with `ModelNotFit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelModel {
    coordinate: Coordinate,
    model: Option<FittedModel>,
}

impl PixelModel {
    /// Placeholder for a coordinate that has not been fitted yet
    pub const fn unfitted(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            model: None,
        }
    }

    /// Wrap an already fitted model
    pub const fn from_model(coordinate: Coordinate, model: FittedModel) -> Self {
        Self {
            coordinate,
            model: Some(model),
        }
    }

    /// Fit a model for `coordinate` from its sample
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` carrying the coordinate if the sample is empty
    pub fn fit(
        coordinate: Coordinate,
        sample: &[Intensity],
        fitter: &DistributionFitter,
    ) -> Result<(Self, FitReport)> {
        let report = fitter.fit_with_report(sample).at_coordinate(coordinate)?;
        Ok((Self::from_model(coordinate, report.model), report))
    }

    /// Coordinate this model describes
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Fitted distribution, if any
    pub const fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    /// Whether a distribution has been fitted
    pub const fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Draw one real-valued intensity from the fitted distribution
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFit` if no distribution has been fitted
    pub fn sample_continuous<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        self.model
            .as_ref()
            .map(|model| model.draw(rng))
            .ok_or(SynthesisError::ModelNotFit {
                coordinate: self.coordinate,
            })
    }

    /// Draw one intensity, rounded to the nearest integer and clipped to `[0, 255]`
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFit` if no distribution has been fitted
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Intensity> {
        let value = self.sample_continuous(rng)?;
        Ok(value.round().clamp(MIN_INTENSITY, MAX_INTENSITY) as Intensity)
    }
}
