//! Independent per-pixel synthesis of a full image

use crate::algorithm::model::PixelModel;
use crate::analysis::extraction::Intensity;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::{Coordinate, Dimensions, Grid};
use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One pixel model per coordinate
pub type ModelGrid = Grid<PixelModel>;

/// A `width x height` grid of synthesized intensities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticImage {
    pixels: Grid<Intensity>,
}

impl SyntheticImage {
    /// Wrap a grid of intensities
    pub const fn from_grid(pixels: Grid<Intensity>) -> Self {
        Self { pixels }
    }

    /// Image dimensions
    pub const fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions()
    }

    /// Intensity at `coordinate`, or `None` outside the image
    pub fn get(&self, coordinate: Coordinate) -> Option<Intensity> {
        self.pixels.get(coordinate).copied()
    }

    /// Borrow the underlying grid
    pub const fn pixels(&self) -> &Grid<Intensity> {
        &self.pixels
    }

    /// Convert to an `image` buffer for encoding
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.pixels.width(), self.pixels.height(), |x, y| {
            Luma([self.get(Coordinate::new(x, y)).unwrap_or(0)])
        })
    }
}

/// Draws a synthetic image by sampling every pixel model exactly once
///
/// Pixels are visited in row-major order, so a seeded generator reproduces the
/// same image.
#[derive(Debug, Clone)]
pub struct ImageSynthesizer<R: Rng = StdRng> {
    rng: R,
}

impl ImageSynthesizer<StdRng> {
    /// Synthesizer backed by a seeded standard generator
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> ImageSynthesizer<R> {
    /// Synthesizer drawing from an injected generator
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Sample every model in `models` once
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `width x height` does not match the model grid
    /// - Any model has not been fitted
    pub fn synthesize(
        &mut self,
        models: &ModelGrid,
        width: u32,
        height: u32,
    ) -> Result<SyntheticImage> {
        let requested = Dimensions::new(width, height)?;
        if requested != models.dimensions() {
            return Err(SynthesisError::InvalidParameter {
                parameter: "dimensions",
                value: requested.to_string(),
                reason: format!("model grid is {}", models.dimensions()),
            });
        }

        let mut pixels = Vec::with_capacity(requested.pixel_count());
        for (_, model) in models.iter() {
            pixels.push(model.sample(&mut self.rng)?);
        }

        Ok(SyntheticImage::from_grid(Grid::from_row_major(
            requested, pixels,
        )?))
    }

    /// Give back the generator, e.g. to continue a reproducible stream
    pub fn into_rng(self) -> R {
        self.rng
    }
}
