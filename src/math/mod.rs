//! Mathematical utilities for normal probabilities and normality testing

/// Shapiro-Wilk normality test
pub mod normality;
/// Normal distribution helpers and truncated sampling
pub mod probability;
