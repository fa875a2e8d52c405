//! Conversion between decoded images and pixel matrices, plus load and save

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, RgbImage, RgbaImage};
use ndarray::Array3;

use crate::io::error::{QuiltError, Result, computation_error};
use crate::spatial::PixelMatrix;

/// Convert a decoded image into a pixel matrix
///
/// 8-bit gray, RGB and RGBA are taken as is; deeper RGB(A) and gray formats
/// are reduced to 8 bits per channel.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for gray-alpha images, whose two channels the
/// engine does not handle
pub fn matrix_from_image(img: &DynamicImage) -> Result<PixelMatrix> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let (raw, channels) = match img {
        DynamicImage::ImageLuma8(buffer) => (buffer.as_raw().clone(), 1),
        DynamicImage::ImageLuma16(_) => (img.to_luma8().into_raw(), 1),
        DynamicImage::ImageRgb8(buffer) => (buffer.as_raw().clone(), 3),
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            (img.to_rgb8().into_raw(), 3)
        }
        DynamicImage::ImageRgba8(buffer) => (buffer.as_raw().clone(), 4),
        DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
            (img.to_rgba8().into_raw(), 4)
        }
        other => {
            return Err(QuiltError::UnsupportedFormat {
                channels: usize::from(other.color().channel_count()),
            });
        }
    };

    let data = Array3::from_shape_vec((height, width, channels), raw)
        .map_err(|err| computation_error("image to matrix", &err))?;
    PixelMatrix::from_array(data)
}

/// Convert a pixel matrix back into a decoded image of matching layout
///
/// # Errors
///
/// Returns `UnsupportedFormat` if the channel count has no image counterpart
pub fn image_from_matrix(matrix: &PixelMatrix) -> Result<DynamicImage> {
    let width = matrix.cols() as u32;
    let height = matrix.rows() as u32;
    let raw: Vec<u8> = matrix.view().iter().copied().collect();
    let too_short = || computation_error("matrix to image", &"buffer shorter than image");

    match matrix.channels() {
        1 => {
            let buffer: GrayImage =
                ImageBuffer::from_raw(width, height, raw).ok_or_else(too_short)?;
            Ok(DynamicImage::ImageLuma8(buffer))
        }
        3 => {
            let buffer: RgbImage =
                ImageBuffer::from_raw(width, height, raw).ok_or_else(too_short)?;
            Ok(DynamicImage::ImageRgb8(buffer))
        }
        4 => {
            let buffer: RgbaImage =
                ImageBuffer::from_raw(width, height, raw).ok_or_else(too_short)?;
            Ok(DynamicImage::ImageRgba8(buffer))
        }
        channels => Err(QuiltError::UnsupportedFormat { channels }),
    }
}

/// Load a sample image from disk
///
/// # Errors
///
/// Returns `ImageLoad` if decoding fails, or `UnsupportedFormat` for pixel
/// layouts the engine does not handle
pub fn load_sample(path: &Path) -> Result<PixelMatrix> {
    let img = image::open(path).map_err(|e| QuiltError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    matrix_from_image(&img)
}

/// Save a pixel matrix, creating parent directories as needed
///
/// The format follows the path's extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_matrix(matrix: &PixelMatrix, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image_from_matrix(matrix)?
        .save(output_path)
        .map_err(|e| QuiltError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
