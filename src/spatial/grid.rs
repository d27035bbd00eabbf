//! Dense per-coordinate storage for models and synthesized intensities
//!
//! Cells live in an `Array2` indexed `[row, col]`, i.e. `[y, x]`, so row-major
//! iteration visits coordinates in the same order as `Dimensions::coordinates`.

use ndarray::Array2;

use crate::io::error::{Result, SynthesisError};
use crate::spatial::coordinate::{Coordinate, Dimensions};

/// A `width x height` grid holding one value per coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
    dimensions: Dimensions,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `init` once per coordinate in row-major order
    pub fn from_fn(dimensions: Dimensions, mut init: impl FnMut(Coordinate) -> T) -> Self {
        let shape = (dimensions.height as usize, dimensions.width as usize);
        let cells = Array2::from_shape_fn(shape, |(row, col)| {
            init(Coordinate::new(col as u32, row as u32))
        });
        Self { cells, dimensions }
    }

    /// Build a grid from cells listed in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the number of cells differs from the pixel count
    pub fn from_row_major(dimensions: Dimensions, cells: Vec<T>) -> Result<Self> {
        let count = cells.len();
        let shape = (dimensions.height as usize, dimensions.width as usize);
        let cells = Array2::from_shape_vec(shape, cells).map_err(|e| {
            SynthesisError::InvalidParameter {
                parameter: "cells",
                value: count.to_string(),
                reason: format!("expected {} cells for {dimensions}: {e}", dimensions.pixel_count()),
            }
        })?;
        Ok(Self { cells, dimensions })
    }

    /// Grid dimensions
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of columns
    pub const fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Number of rows
    pub const fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Cell at `coordinate`, or `None` outside the grid
    pub fn get(&self, coordinate: Coordinate) -> Option<&T> {
        self.cells
            .get([coordinate.y as usize, coordinate.x as usize])
    }

    /// Mutable cell at `coordinate`, or `None` outside the grid
    pub fn get_mut(&mut self, coordinate: Coordinate) -> Option<&mut T> {
        self.cells
            .get_mut([coordinate.y as usize, coordinate.x as usize])
    }

    /// Iterate cells with their coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| (Coordinate::new(col as u32, row as u32), cell))
    }

    /// Apply `f` to every cell, keeping positions
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.map(f),
            dimensions: self.dimensions,
        }
    }

    /// Borrow the underlying `[y, x]` array
    pub const fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}
