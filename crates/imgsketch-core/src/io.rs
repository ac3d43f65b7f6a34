//! Load/save adapters between [`PixelBuffer`] and image files.
//!
//! Decoding and encoding are delegated to the `image` crate. Loaded samples
//! keep their native range (0–255 for 8-bit, 0–65535 for 16-bit, floats as
//! stored); saved samples are rounded and saturated to 8 bits.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, Rgba};
use ndarray::{Array2, Array3};

use crate::error::{ProcessError, ProcessResult};
use crate::image::PixelBuffer;

/// Load an image, logging and returning `None` if it is missing or unreadable.
pub fn load_image(path: impl AsRef<Path>) -> Option<PixelBuffer> {
    let path = path.as_ref();
    match try_load_image(path) {
        Ok(buffer) => Some(buffer),
        Err(ProcessError::FileNotFound(_)) => {
            tracing::warn!("No such file {}", path.display());
            None
        }
        Err(e) => {
            tracing::error!("Failed to load {}: {e}", path.display());
            None
        }
    }
}

/// Load an image as `(H, W)` for luma images or `(H, W, C)` otherwise.
///
/// Luma+alpha yields 2 channels, RGB 3, RGBA 4. Formats outside those
/// layouts are converted to 8-bit RGBA first.
pub fn try_load_image(path: impl AsRef<Path>) -> ProcessResult<PixelBuffer> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ProcessError::FileNotFound(path.to_path_buf()));
    }
    let img = image::open(path).map_err(ProcessError::Decode)?;
    let (h, w) = (img.height() as usize, img.width() as usize);

    let buffer = match img {
        DynamicImage::ImageLuma8(buf) => from_samples(h, w, 1, buf.as_raw())?,
        DynamicImage::ImageLumaA8(buf) => from_samples(h, w, 2, buf.as_raw())?,
        DynamicImage::ImageRgb8(buf) => from_samples(h, w, 3, buf.as_raw())?,
        DynamicImage::ImageRgba8(buf) => from_samples(h, w, 4, buf.as_raw())?,
        DynamicImage::ImageLuma16(buf) => from_samples(h, w, 1, buf.as_raw())?,
        DynamicImage::ImageLumaA16(buf) => from_samples(h, w, 2, buf.as_raw())?,
        DynamicImage::ImageRgb16(buf) => from_samples(h, w, 3, buf.as_raw())?,
        DynamicImage::ImageRgba16(buf) => from_samples(h, w, 4, buf.as_raw())?,
        DynamicImage::ImageRgb32F(buf) => from_samples(h, w, 3, buf.as_raw())?,
        DynamicImage::ImageRgba32F(buf) => from_samples(h, w, 4, buf.as_raw())?,
        other => from_samples(h, w, 4, other.to_rgba8().as_raw())?,
    };
    tracing::debug!(%buffer, "loaded {}", path.display());
    Ok(buffer)
}

fn from_samples<T: Copy + Into<f64>>(
    height: usize,
    width: usize,
    channels: usize,
    samples: &[T],
) -> ProcessResult<PixelBuffer> {
    let data: Vec<f64> = samples.iter().map(|&s| s.into()).collect();
    let buffer = if channels == 1 {
        Array2::from_shape_vec((height, width), data).map(PixelBuffer::Gray)
    } else {
        Array3::from_shape_vec((height, width, channels), data).map(PixelBuffer::Color)
    };
    buffer.map_err(|e| ProcessError::TypeMismatch(e.to_string()))
}

/// Save `buffer` as `directory/filename`, logging failures. Returns whether the write succeeded.
pub fn save_image(buffer: &PixelBuffer, directory: impl AsRef<Path>, filename: &str) -> bool {
    match try_save_image(buffer, directory.as_ref(), filename) {
        Ok(path) => {
            tracing::info!("Saved {buffer} to {}", path.display());
            true
        }
        Err(e) => {
            tracing::error!("Failed to save {filename}: {e}");
            false
        }
    }
}

/// Encode `buffer` as 8-bit samples into `directory/filename`.
///
/// The format follows the file extension. Buffers with 1–4 channels map to
/// L, LA, RGB, and RGBA. Returns the written path.
pub fn try_save_image(
    buffer: &PixelBuffer,
    directory: impl AsRef<Path>,
    filename: &str,
) -> ProcessResult<PathBuf> {
    let path = directory.as_ref().join(filename);
    let too_large = |_| ProcessError::TypeMismatch(format!("{buffer} exceeds encoder limits"));
    let width = u32::try_from(buffer.width()).map_err(too_large)?;
    let height = u32::try_from(buffer.height()).map_err(too_large)?;

    let bytes: Vec<u8> = buffer.view_dyn().iter().map(|&v| to_byte(v)).collect();
    let mismatch = || ProcessError::DegenerateInput("sample count does not match buffer dimensions");

    let image = match buffer.channels() {
        1 => ImageBuffer::<Luma<u8>, _>::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, bytes).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8),
        n => {
            return Err(ProcessError::TypeMismatch(format!(
                "cannot encode a {n}-channel buffer"
            )));
        }
    }
    .ok_or_else(mismatch)?;

    image.save(&path).map_err(ProcessError::Encode)?;
    Ok(path)
}

/// Round and saturate to `0..=255`. NaN maps to 0.
fn to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
