//! RGB to grayscale reduction with ITU-R BT.709 luma weights.

use ndarray::{Axis, Zip};

use crate::error::{ProcessError, ProcessResult};
use crate::image::PixelBuffer;

/// BT.709 luma weights for `[R, G, B]`.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Reduce an RGB(A) buffer to a single channel.
///
/// Buffers that are already grayscale (see [`crate::buffer::is_grayscale`])
/// are returned unchanged, as is any `Gray` buffer. Otherwise only the
/// first three channels contribute, so alpha is ignored.
pub fn rgb_to_gray(image: &PixelBuffer) -> ProcessResult<PixelBuffer> {
    let color = match image {
        PixelBuffer::Color(color) if !image.is_grayscale() => color,
        _ => return Ok(image.clone()),
    };

    let channels = color.dim().2;
    if channels < 3 {
        return Err(ProcessError::TypeMismatch(format!(
            "grayscale conversion needs at least 3 channels, got {channels}"
        )));
    }

    let [wr, wg, wb] = LUMA_WEIGHTS;
    let gray = Zip::from(color.index_axis(Axis(2), 0))
        .and(color.index_axis(Axis(2), 1))
        .and(color.index_axis(Axis(2), 2))
        .map_collect(|&r, &g, &b| wr * r + wg * g + wb * b);

    Ok(PixelBuffer::Gray(gray))
}
