//! Model selection and parameter estimation for per-pixel samples
//!
//! A Shapiro-Wilk p-value picks between a clipped Normal model and a Uniform
//! model spanning the observed range. Which side of the significance level
//! means "Normal" is configurable through [`NormalityRule`].

use crate::analysis::extraction::Intensity;
use crate::analysis::statistics::{SampleSummary, to_f64};
use crate::io::configuration::{
    DEFAULT_SIGNIFICANCE, DEFAULT_SPREAD_SHRINKAGE, MAX_INTENSITY, MIN_INTENSITY,
    SHAPIRO_WILK_MIN_SAMPLES,
};
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::math::normality::{ShapiroWilk, shapiro_wilk};
use crate::math::probability::sample_truncated_normal;
use rand::Rng;
use std::fmt;

/// Which p-values select the Normal model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalityRule {
    /// Normal when `p < significance`, Uniform when `p >= significance`
    ///
    /// This is the historical behaviour of the tool. It reverses the usual
    /// reading of the test, where a small p-value is evidence against normality.
    #[default]
    Inverted,
    /// Normal when `p >= significance`, Uniform when `p < significance`
    Standard,
}

/// The two model families a pixel can be fitted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Normal distribution truncated to the intensity range
    Normal,
    /// Uniform distribution over the observed range
    Uniform,
}

/// Fitted distribution for one coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FittedModel {
    /// Normal model, drawn truncated to `[0, 255]`
    Normal {
        /// Maximum-likelihood mean
        mean: f64,
        /// Maximum-likelihood standard deviation after shrinkage, always positive
        std_dev: f64,
    },
    /// Uniform model over `[low, high]`
    Uniform {
        /// Smallest observed intensity
        low: f64,
        /// Largest observed intensity
        high: f64,
    },
}

impl FittedModel {
    /// Build a Normal model
    ///
    /// The mean may lie outside the intensity range; draws are truncated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the mean is not finite or the standard
    /// deviation is not a positive finite number
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(invalid_parameter("mean", &mean, &"must be finite"));
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(invalid_parameter(
                "std_dev",
                &std_dev,
                &"must be positive and finite",
            ));
        }
        Ok(Self::Normal { mean, std_dev })
    }

    /// Build a Uniform model
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless `0 <= low <= high <= 255`
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        let in_range = |v: f64| (MIN_INTENSITY..=MAX_INTENSITY).contains(&v);
        if !(in_range(low) && in_range(high) && low <= high) {
            return Err(invalid_parameter(
                "uniform bounds",
                &format!("[{low}, {high}]"),
                &"must satisfy 0 <= low <= high <= 255",
            ));
        }
        Ok(Self::Uniform { low, high })
    }

    /// Family of this model
    pub const fn family(&self) -> ModelFamily {
        match self {
            Self::Normal { .. } => ModelFamily::Normal,
            Self::Uniform { .. } => ModelFamily::Uniform,
        }
    }

    /// Draw one real-valued intensity
    ///
    /// Normal draws always lie in `[0, 255]`. Uniform draws lie in `[low, high]`
    /// and are not rounded.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Normal { mean, std_dev } => {
                sample_truncated_normal(rng, mean, std_dev, MIN_INTENSITY, MAX_INTENSITY)
            }
            Self::Uniform { low, high } => {
                if high > low {
                    rng.random_range(low..=high)
                } else {
                    low
                }
            }
        }
    }
}

impl fmt::Display for FittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal { mean, std_dev } => {
                write!(f, "Normal(mean = {mean:.3}, std_dev = {std_dev:.3})")
            }
            Self::Uniform { low, high } => write!(f, "Uniform(low = {low}, high = {high})"),
        }
    }
}

/// Parameters controlling model selection and estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// P-value threshold between the two branches
    pub significance: f64,
    /// Which side of the threshold selects the Normal model
    pub rule: NormalityRule,
    /// Factor applied to the fitted standard deviation of Normal models
    pub spread_shrinkage: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            rule: NormalityRule::default(),
            spread_shrinkage: DEFAULT_SPREAD_SHRINKAGE,
        }
    }
}

impl FitConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the significance level is not strictly
    /// between 0 and 1 or the shrinkage factor is not positive and finite
    pub fn validate(&self) -> Result<()> {
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(invalid_parameter(
                "significance",
                &self.significance,
                &"must lie strictly between 0 and 1",
            ));
        }
        if !(self.spread_shrinkage.is_finite() && self.spread_shrinkage > 0.0) {
            return Err(invalid_parameter(
                "spread_shrinkage",
                &self.spread_shrinkage,
                &"must be positive and finite",
            ));
        }
        Ok(())
    }

    /// Model family selected by a normality test p-value
    ///
    /// The significance level itself belongs to the `p >= significance` side.
    pub fn select_family(&self, p_value: f64) -> ModelFamily {
        debug_assert!(
            (0.0..=1.0).contains(&p_value),
            "p-value {p_value} is not a probability"
        );
        let below = p_value < self.significance;
        match (self.rule, below) {
            (NormalityRule::Inverted, true) | (NormalityRule::Standard, false) => {
                ModelFamily::Normal
            }
            (NormalityRule::Inverted, false) | (NormalityRule::Standard, true) => {
                ModelFamily::Uniform
            }
        }
    }
}

/// A fitted model together with the normality test that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Selected and estimated model
    pub model: FittedModel,
    /// Shapiro-Wilk outcome the selection was based on
    pub normality: ShapiroWilk,
    /// Number of observations in the sample
    pub sample_size: usize,
}

/// Selects and estimates a model for one coordinate's sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistributionFitter {
    config: FitConfig,
}

impl DistributionFitter {
    /// Create a fitter
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation
    pub fn new(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit a model to `sample`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the sample is empty
    pub fn fit(&self, sample: &[Intensity]) -> Result<FittedModel> {
        self.fit_with_report(sample).map(|report| report.model)
    }

    /// Fit a model to `sample` and keep the normality test outcome
    ///
    /// Samples too small for the Shapiro-Wilk test are treated as showing no
    /// evidence against normality (`p = 1`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sample is empty
    /// - The normality test fails numerically
    pub fn fit_with_report(&self, sample: &[Intensity]) -> Result<FitReport> {
        let summary = SampleSummary::from_sample(sample)
            .ok_or(SynthesisError::InsufficientData { coordinate: None })?;

        let normality = if summary.count < SHAPIRO_WILK_MIN_SAMPLES {
            ShapiroWilk::NO_EVIDENCE
        } else {
            shapiro_wilk(&to_f64(sample))?
        };

        let model = match self.config.select_family(normality.p_value) {
            ModelFamily::Normal => self.normal_model(&summary)?,
            ModelFamily::Uniform => uniform_model(&summary)?,
        };

        Ok(FitReport {
            model,
            normality,
            sample_size: summary.count,
        })
    }

    fn normal_model(&self, summary: &SampleSummary) -> Result<FittedModel> {
        // A zero spread cannot parameterise a Normal model; only constant samples get here
        if summary.std_dev <= 0.0 {
            return uniform_model(summary);
        }
        FittedModel::normal(summary.mean, summary.std_dev * self.config.spread_shrinkage)
    }
}

fn uniform_model(summary: &SampleSummary) -> Result<FittedModel> {
    FittedModel::uniform(f64::from(summary.min), f64::from(summary.max))
}
