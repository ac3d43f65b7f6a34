//! Buffer utilities — grayscale test, zero padding, and normalization.
//!
//! These helpers underlie every other transform. Normalization here is a
//! scale-from-zero rescale (`v / max * range_end`), not an affine
//! min-max stretch: the minimum is never subtracted.

use ndarray::{Array, Array2, ArrayBase, ArrayView2, Data, Dimension, s};

use crate::error::{ProcessError, ProcessResult};
use crate::image::PixelBuffer;

/// Upper bound used when a transform needs samples in `[0, 1]`.
pub const UNIT_RANGE_END: f64 = 1.0;
/// Upper bound used for 8-bit-like output.
pub const BYTE_RANGE_END: f64 = 255.0;

/// True iff the shape, with every length-1 axis collapsed, has exactly two axes.
///
/// `(H, W)` and `(H, W, 1)` are grayscale. A single-row RGB image `(1, W, 3)`
/// also collapses to two axes and counts as grayscale, while a single-row
/// gray image `(1, W)` collapses to one axis and does not.
pub fn is_grayscale(buffer: &PixelBuffer) -> bool {
    buffer.shape().iter().filter(|&&len| len != 1).count() == 2
}

/// Surround a single-channel image with `pad_width` zeros on every side.
///
/// The result has shape `(H + 2·pad_width, W + 2·pad_width)` with `image`
/// copied into the center. Multi-channel padding is not supported.
pub fn pad(image: ArrayView2<'_, f64>, pad_width: usize) -> Array2<f64> {
    let (height, width) = image.dim();
    let mut padded = Array2::zeros((height + 2 * pad_width, width + 2 * pad_width));
    padded
        .slice_mut(s![pad_width..pad_width + height, pad_width..pad_width + width])
        .assign(&image);
    padded
}

/// Rescale every sample by `(value / max) * range_end`.
///
/// Fails with [`ProcessError::DegenerateInput`] when the maximum is zero or
/// not finite (empty buffers included), where the division is undefined.
pub fn normalize<S, D>(buffer: &ArrayBase<S, D>, range_end: f64) -> ProcessResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let max = max_value(buffer);
    if max == 0.0 || !max.is_finite() {
        return Err(ProcessError::DegenerateInput(
            "normalization needs a finite, non-zero maximum",
        ));
    }
    Ok(buffer.mapv(|v| (v / max) * range_end))
}

/// Largest sample, `-inf` if the buffer is empty.
pub fn max_value<S, D>(buffer: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    buffer.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
}

/// Smallest sample, `+inf` if the buffer is empty.
pub fn min_value<S, D>(buffer: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    buffer.fold(f64::INFINITY, |acc, &v| acc.min(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    #[test]
    fn test_is_grayscale_by_collapsed_rank() {
        assert!(is_grayscale(&PixelBuffer::Gray(Array2::zeros((4, 5)))));
        assert!(is_grayscale(&PixelBuffer::Color(Array3::zeros((4, 5, 1)))));
        assert!(!is_grayscale(&PixelBuffer::Color(Array3::zeros((4, 5, 3)))));
    }

    #[test]
    fn test_is_grayscale_singleton_edge_cases() {
        // (1, W, 3) collapses to (W, 3).
        assert!(is_grayscale(&PixelBuffer::Color(Array3::zeros((1, 5, 3)))));
        // (1, W) collapses to (W,).
        assert!(!is_grayscale(&PixelBuffer::Gray(Array2::zeros((1, 5)))));
    }

    #[test]
    fn test_pad_places_image_in_center() {
        let img = array![[1.0, 2.0], [3.0, 4.0]];
        let padded = pad(img.view(), 2);
        assert_eq!(padded.dim(), (6, 6));
        assert_eq!(padded.slice(s![2..4, 2..4]), img);
        let border_sum: f64 = padded.sum() - img.sum();
        assert_eq!(border_sum, 0.0);
    }

    #[test]
    fn test_pad_zero_width_is_copy() {
        let img = array![[1.0, 2.0, 3.0]];
        assert_eq!(pad(img.view(), 0), img);
    }

    #[test]
    fn test_normalize_scales_from_zero() {
        let img = array![[2.0, 4.0], [6.0, 8.0]];
        let out = normalize(&img, 1.0).unwrap();
        // Minimum is not subtracted: 2/8 stays 0.25.
        assert_eq!(out, array![[0.25, 0.5], [0.75, 1.0]]);

        let out = normalize(&img, BYTE_RANGE_END).unwrap();
        assert_eq!(out[[1, 1]], 255.0);
    }

    #[test]
    fn test_normalize_zero_max_is_degenerate() {
        let img = Array2::<f64>::zeros((3, 3));
        let err = normalize(&img, 1.0).unwrap_err();
        assert!(matches!(err, ProcessError::DegenerateInput(_)));
    }

    #[test]
    fn test_normalize_negative_max_is_allowed() {
        let img = array![[-2.0, -4.0]];
        let out = normalize(&img, 1.0).unwrap();
        assert_eq!(out, array![[1.0, 2.0]]);
    }
}
