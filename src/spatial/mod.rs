//! Spatial data structures shared by extraction, fitting and synthesis
//!
//! This module contains:
//! - Pixel coordinates and raster dimensions
//! - A dense per-coordinate grid

/// Coordinates and dimension checks
pub mod coordinate;
/// Per-coordinate grid storage
pub mod grid;

pub use coordinate::{Coordinate, Dimensions};
pub use grid::Grid;
