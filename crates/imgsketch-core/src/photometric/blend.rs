//! Color-dodge compositing.
//!
//! ```text
//! out = clamp_max(back / ((1 - front) + ε), 1.0) · 255 / max(...)
//! ```

use ndarray::{Array, ArrayBase, Data, Dimension, Zip};

use crate::buffer::BYTE_RANGE_END;
use crate::error::{ProcessError, ProcessResult};
use crate::image::PixelBuffer;

/// Added to the divisor so a fully white front layer does not divide by zero.
pub const DODGE_EPSILON: f64 = 1e-11;

/// Blend `back` (`img2`) under `front` (`img1`) with color dodge.
///
/// Both inputs are expected in `[0, 1]`. The range guard only rejects the
/// pair when *both* maxima exceed 1.0; a single out-of-range input passes.
/// Quotients above 1.0 are clamped to 1.0 and the result is rescaled to
/// `[0, 255]` by its own maximum.
pub fn color_dodge(front: &PixelBuffer, back: &PixelBuffer) -> ProcessResult<PixelBuffer> {
    if front.shape() != back.shape() {
        return Err(ProcessError::ShapeMismatch {
            left: front.shape().to_vec(),
            right: back.shape().to_vec(),
        });
    }

    let (max_a, max_b) = (front.max_value(), back.max_value());
    if max_a > 1.0 && max_b > 1.0 {
        return Err(ProcessError::BlendRangeViolation { max_a, max_b });
    }
    tracing::debug!(%front, max_a, max_b, "color_dodge");

    let blended = match (front, back) {
        (PixelBuffer::Gray(a), PixelBuffer::Gray(b)) => PixelBuffer::Gray(dodge(a, b)),
        (PixelBuffer::Color(a), PixelBuffer::Color(b)) => PixelBuffer::Color(dodge(a, b)),
        _ => {
            return Err(ProcessError::ShapeMismatch {
                left: front.shape().to_vec(),
                right: back.shape().to_vec(),
            });
        }
    };

    blended.normalize(BYTE_RANGE_END)
}

fn dodge<S, D>(front: &ArrayBase<S, D>, back: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Zip::from(front).and(back).map_collect(|&a, &b| {
        let v = b / ((1.0 - a) + DODGE_EPSILON);
        if v > 1.0 { 1.0 } else { v }
    })
}
