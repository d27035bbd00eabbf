//! Per-pixel statistical modelling of greyscale image corpora
//!
//! Every coordinate's intensities across a directory of images are tested for
//! normality and fitted with either a truncated Normal or a Uniform model. A new
//! image is synthesized by drawing each pixel independently from its model.

#![forbid(unsafe_code)]

/// Pixel models, image synthesis and the end-to-end pipeline
pub mod algorithm;
/// Sample extraction, summary statistics and distribution fitting
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Normal probabilities and the Shapiro-Wilk test
pub mod math;
/// Coordinates, dimensions and per-coordinate grids
pub mod spatial;

pub use io::error::{Result, SynthesisError};
