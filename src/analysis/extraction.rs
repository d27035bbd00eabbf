//! Per-coordinate intensity samples gathered across an image corpus
//!
//! Two strategies produce identical samples:
//! - [`extract`] rescans the directory and decodes every image for a single
//!   coordinate, holding one intensity per image in memory
//! - [`extract_all`] decodes every image once and keeps the whole stack,
//!   answering any coordinate without further I/O

use crate::io::corpus::corpus_files;
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::io::image::{load_greyscale, load_greyscale_pixel};
use crate::spatial::{Coordinate, Dimensions};
use image::{GrayImage, Luma};
use ndarray::{Array3, Axis};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Greyscale value of one pixel in one image
pub type Intensity = u8;

/// Intensities observed at one coordinate, one per successfully decoded image
pub type Sample = Vec<Intensity>;

fn report_skipped(path: &Path, error: &SynthesisError) {
    warn!("Skipping {}: {error}", path.display());
}

/// Collect the intensity at `coordinate` from every decodable image in `directory`
///
/// Undecodable files are logged and left out of the sample. A missing directory,
/// or one without decodable images, yields an empty sample.
///
/// # Errors
///
/// Returns `OutOfBounds` if `coordinate` lies outside `dimensions`
pub fn extract(directory: &Path, coordinate: Coordinate, dimensions: Dimensions) -> Result<Sample> {
    dimensions.check(coordinate)?;
    let files = corpus_files(directory);
    extract_from_files(&files, coordinate, dimensions)
}

/// Collect the intensity at `coordinate` from each of `files`
///
/// # Errors
///
/// Returns `OutOfBounds` if `coordinate` lies outside `dimensions`
pub fn extract_from_files(
    files: &[PathBuf],
    coordinate: Coordinate,
    dimensions: Dimensions,
) -> Result<Sample> {
    dimensions.check(coordinate)?;

    let mut sample = Vec::with_capacity(files.len());
    for path in files {
        match load_greyscale_pixel(path, coordinate, dimensions) {
            Ok(value) => sample.push(value),
            Err(e) => report_skipped(path, &e),
        }
    }

    debug!(
        "Extracted {} intensities at {coordinate} from {} files",
        sample.len(),
        files.len()
    );
    Ok(sample)
}

/// Decode every image in `directory` once and stack them for per-coordinate access
///
/// # Errors
///
/// Returns an error if the decoded images cannot be stacked
pub fn extract_all(directory: &Path, dimensions: Dimensions) -> Result<SampleGrid> {
    let files = corpus_files(directory);
    extract_all_from_files(&files, dimensions, |_| {})
}

/// Decode each of `files` once and stack them, calling `on_file` after every attempt
///
/// # Errors
///
/// Returns an error if the decoded images cannot be stacked
pub fn extract_all_from_files(
    files: &[PathBuf],
    dimensions: Dimensions,
    mut on_file: impl FnMut(&Path),
) -> Result<SampleGrid> {
    let mut images = Vec::with_capacity(files.len());
    for path in files {
        match load_greyscale(path, dimensions) {
            Ok(grey) => images.push(grey),
            Err(e) => report_skipped(path, &e),
        }
        on_file(path);
    }

    info!(
        "Decoded {} of {} files at {dimensions}",
        images.len(),
        files.len()
    );
    SampleGrid::from_images(&images, dimensions)
}

/// Decoded corpus stored as a `(y, x, image)` intensity stack
///
/// Each `(y, x)` lane is the sample for that coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    stack: Array3<Intensity>,
    dimensions: Dimensions,
}

impl SampleGrid {
    /// Stack greyscale images that all share `dimensions`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any image has different dimensions
    pub fn from_images(images: &[GrayImage], dimensions: Dimensions) -> Result<Self> {
        let shape = (
            dimensions.height as usize,
            dimensions.width as usize,
            images.len(),
        );
        let mut stack = Array3::zeros(shape);

        for (index, grey) in images.iter().enumerate() {
            if grey.dimensions() != (dimensions.width, dimensions.height) {
                return Err(invalid_parameter(
                    "image dimensions",
                    &format!("{}x{}", grey.width(), grey.height()),
                    &format!("every stacked image must be {dimensions}"),
                ));
            }
            for (x, y, &Luma([value])) in grey.enumerate_pixels() {
                if let Some(cell) = stack.get_mut((y as usize, x as usize, index)) {
                    *cell = value;
                }
            }
        }

        Ok(Self { stack, dimensions })
    }

    /// Dimensions every image was resized to
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of decoded images in the stack
    pub fn image_count(&self) -> usize {
        self.stack.len_of(Axis(2))
    }

    /// Sample at `coordinate`, in corpus order
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the stack
    pub fn sample(&self, coordinate: Coordinate) -> Result<Sample> {
        self.dimensions.check(coordinate)?;
        let lane = self
            .stack
            .index_axis(Axis(0), coordinate.y as usize)
            .index_axis(Axis(0), coordinate.x as usize)
            .to_vec();
        Ok(lane)
    }
}
