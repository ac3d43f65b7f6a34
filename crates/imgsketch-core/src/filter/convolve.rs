//! Direct-form 2D convolution.
//!
//! This is cross-correlation: the kernel is not flipped. The image is
//! zero-padded by `k - 2` on every side and each output sample at `(y, x)`
//! is the dot product of the kernel with the padded window
//! `[y .. y + k, x .. x + k]`. For `k = 3` the window is centered on the
//! source pixel; larger kernels shift it toward the top-left.
//! [`correlate_centered`] pads by `k / 2` instead and keeps the window
//! centered for any odd `k`.
//!
//! # Complexity
//! O(H × W × k²). No separable fast path, no striding.

use ndarray::{Array2, ArrayView2, Zip, s};

use crate::buffer::pad;
use crate::error::{ProcessError, ProcessResult};

/// Smallest kernel side for which the `k - 2` padding keeps every window in bounds.
pub const MIN_KERNEL_SIZE: usize = 3;

/// Convolve a single-channel image with a square kernel.
///
/// The output has the same shape as `image`. With the `parallel` feature,
/// rows are computed on the rayon pool; every sample is still produced by
/// the same window sum, so results are bit-identical to the sequential path.
pub fn convolve2d(image: ArrayView2<'_, f64>, kernel: ArrayView2<'_, f64>) -> ProcessResult<Array2<f64>> {
    let k = square_side(kernel)?;
    if k < MIN_KERNEL_SIZE {
        return Err(ProcessError::InvalidKernel(format!(
            "kernel side must be at least {MIN_KERNEL_SIZE}, got {k}"
        )));
    }
    tracing::debug!(height = image.nrows(), width = image.ncols(), kernel = k, "convolve2d");
    correlate(image, kernel, k - 2)
}

/// Cross-correlate with the kernel anchored at its center.
///
/// Pads by `k / 2`, so the window for `(y, x)` is centered on the source
/// pixel for odd `k` (one sample toward the bottom-right for even `k`).
/// An impulse stays in place, which is what filtering routines anchored at
/// the kernel center produce. Any kernel side of at least 1 is accepted.
pub fn correlate_centered(image: ArrayView2<'_, f64>, kernel: ArrayView2<'_, f64>) -> ProcessResult<Array2<f64>> {
    let k = square_side(kernel)?;
    if k == 0 {
        return Err(ProcessError::InvalidKernel("kernel is empty".to_string()));
    }
    tracing::debug!(height = image.nrows(), width = image.ncols(), kernel = k, "correlate_centered");
    correlate(image, kernel, k / 2)
}

fn square_side(kernel: ArrayView2<'_, f64>) -> ProcessResult<usize> {
    let (kh, kw) = kernel.dim();
    if kh != kw {
        return Err(ProcessError::InvalidKernel(format!(
            "kernel must be square, got {kh}x{kw}"
        )));
    }
    Ok(kh)
}

/// Windows `[y .. y + k, x .. x + k]` of the image zero-padded by `pad_width`.
///
/// Every window is in bounds as long as `2 · pad_width + 1 >= k`.
fn correlate(image: ArrayView2<'_, f64>, kernel: ArrayView2<'_, f64>, pad_width: usize) -> ProcessResult<Array2<f64>> {
    let (height, width) = image.dim();
    if height == 0 || width == 0 {
        return Ok(Array2::zeros((height, width)));
    }

    let padded = pad(image, pad_width);
    #[cfg(feature = "parallel")]
    let samples = correlate_parallel(padded.view(), kernel, height, width);
    #[cfg(not(feature = "parallel"))]
    let samples = correlate_sequential(padded.view(), kernel, height, width);

    Array2::from_shape_vec((height, width), samples)
        .map_err(|e| ProcessError::TypeMismatch(e.to_string()))
}

/// Dot product of `kernel` with the padded window whose top-left corner is `(y, x)`.
#[inline]
fn window_sum(padded: ArrayView2<'_, f64>, kernel: ArrayView2<'_, f64>, y: usize, x: usize) -> f64 {
    let k = kernel.nrows();
    Zip::from(kernel)
        .and(padded.slice(s![y..y + k, x..x + k]))
        .fold(0.0, |acc, &w, &p| acc + w * p)
}

fn fill_row(padded: ArrayView2<'_, f64>, kernel: ArrayView2<'_, f64>, y: usize, row: &mut [f64]) {
    for (x, out) in row.iter_mut().enumerate() {
        *out = window_sum(padded, kernel, y, x);
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn correlate_sequential(
    padded: ArrayView2<'_, f64>,
    kernel: ArrayView2<'_, f64>,
    height: usize,
    width: usize,
) -> Vec<f64> {
    let mut samples = vec![0.0; height * width];
    for (y, row) in samples.chunks_mut(width).enumerate() {
        fill_row(padded, kernel, y, row);
    }
    samples
}

#[cfg(feature = "parallel")]
fn correlate_parallel(
    padded: ArrayView2<'_, f64>,
    kernel: ArrayView2<'_, f64>,
    height: usize,
    width: usize,
) -> Vec<f64> {
    use rayon::prelude::*;

    let mut samples = vec![0.0; height * width];
    samples
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill_row(padded, kernel, y, row));
    samples
}
