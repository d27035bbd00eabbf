//! Greyscale decoding for corpus images and PNG export of synthesized images

use crate::algorithm::synthesis::SyntheticImage;
use crate::analysis::extraction::Intensity;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::{Coordinate, Dimensions};
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageError, ImageReader, Luma, Rgb, RgbImage};
use std::path::Path;

/// Resampling filter used when fitting corpus images to the target raster
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

// ITU-R 601 luma weights in 16-bit fixed point, summing to 1 << 16
const LUMA_RED: u32 = 19_595;
const LUMA_GREEN: u32 = 38_470;
const LUMA_BLUE: u32 = 7_471;

/// Reduce a colour image to luma with ITU-R 601 weights, alpha ignored
fn rec601_luma(rgb: &RgbImage) -> GrayImage {
    let mut grey = GrayImage::new(rgb.width(), rgb.height());
    for (x, y, &Rgb([r, g, b])) in rgb.enumerate_pixels() {
        let weighted =
            LUMA_RED * u32::from(r) + LUMA_GREEN * u32::from(g) + LUMA_BLUE * u32::from(b);
        grey.put_pixel(x, y, Luma([((weighted + 0x8000) >> 16) as Intensity]));
    }
    grey
}

/// Decode an image, convert it to 8-bit greyscale and resize it to `dimensions`
///
/// The decoder is chosen from the file contents, so files without a recognised
/// extension still decode. Colour images are reduced with ITU-R 601 weights
/// (`0.299 R + 0.587 G + 0.114 B`); greyscale images keep their values.
///
/// # Errors
///
/// Returns `DecodeFailure` if the file cannot be opened or decoded
pub fn load_greyscale(path: &Path, dimensions: Dimensions) -> Result<GrayImage> {
    let decode_failure = |source: ImageError| SynthesisError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| decode_failure(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_failure)?;

    let grey = if img.color().has_color() {
        rec601_luma(&img.to_rgb8())
    } else {
        img.to_luma8()
    };

    if grey.dimensions() == (dimensions.width, dimensions.height) {
        return Ok(grey);
    }

    Ok(imageops::resize(
        &grey,
        dimensions.width,
        dimensions.height,
        RESIZE_FILTER,
    ))
}

/// Read the greyscale intensity at `coordinate` after resizing to `dimensions`
///
/// # Errors
///
/// Returns an error if:
/// - `coordinate` lies outside `dimensions`
/// - The file cannot be opened or decoded
pub fn load_greyscale_pixel(
    path: &Path,
    coordinate: Coordinate,
    dimensions: Dimensions,
) -> Result<Intensity> {
    dimensions.check(coordinate)?;
    let grey = load_greyscale(path, dimensions)?;
    grey.get_pixel_checked(coordinate.x, coordinate.y)
        .map(|&Luma([value])| value)
        .ok_or(SynthesisError::OutOfBounds {
            coordinate,
            dimensions,
        })
}

/// Export a synthesized image as an 8-bit greyscale PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_synthetic_as_png(image: &SyntheticImage, output_path: &Path) -> Result<()> {
    let parent = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .to_gray_image()
        .save(output_path)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
