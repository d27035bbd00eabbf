//! Pixel coordinates and the target raster dimensions they are checked against

use crate::io::error::{Result, SynthesisError};
use std::fmt;

/// A single (x, y) pixel position shared across every image in a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column, counted from the left edge
    pub x: u32,
    /// Row, counted from the top edge
    pub y: u32,
}

impl Coordinate {
    /// Create a coordinate without any bounds check
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height every source image is resized to before sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions, rejecting empty rasters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either side is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 {
            return Err(crate::io::error::invalid_parameter(
                "width",
                &width,
                &"must be at least 1",
            ));
        }
        if height == 0 {
            return Err(crate::io::error::invalid_parameter(
                "height",
                &height,
                &"must be at least 1",
            ));
        }
        Ok(Self { width, height })
    }

    /// Whether `coordinate` lies inside `[0, width) x [0, height)`
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.width && coordinate.y < self.height
    }

    /// Validate a coordinate against these dimensions
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the raster
    pub const fn check(&self, coordinate: Coordinate) -> Result<Coordinate> {
        if self.contains(coordinate) {
            Ok(coordinate)
        } else {
            Err(SynthesisError::OutOfBounds {
                coordinate,
                dimensions: *self,
            })
        }
    }

    /// Total number of pixels
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every coordinate in row-major order (all of row 0, then row 1, ...)
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
