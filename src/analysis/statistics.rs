//! Summary statistics of per-pixel intensity samples

use crate::analysis::extraction::Intensity;

/// Location and spread of one coordinate's sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Number of observations
    pub count: usize,
    /// Smallest observed intensity
    pub min: Intensity,
    /// Largest observed intensity
    pub max: Intensity,
    /// Arithmetic mean
    pub mean: f64,
    /// Maximum-likelihood standard deviation (divides by `count`, not `count - 1`)
    pub std_dev: f64,
}

impl SampleSummary {
    /// Summarise a sample, or `None` if it is empty
    pub fn from_sample(sample: &[Intensity]) -> Option<Self> {
        let min = sample.iter().copied().min()?;
        let max = sample.iter().copied().max()?;

        let count = sample.len();
        let size = count as f64;
        let mean = sample.iter().map(|&v| f64::from(v)).sum::<f64>() / size;
        let variance = sample
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / size;

        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Whether every observation has the same value
    pub const fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

/// Widen a sample to floating point for statistical routines
pub fn to_f64(sample: &[Intensity]) -> Vec<f64> {
    sample.iter().map(|&v| f64::from(v)).collect()
}
