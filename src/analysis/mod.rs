//! Per-pixel sample extraction, summary statistics and distribution fitting

/// Intensity sample extraction from image corpora
pub mod extraction;
/// Normality-driven model selection and estimation
pub mod fitting;
/// Summary statistics of intensity samples
pub mod statistics;
