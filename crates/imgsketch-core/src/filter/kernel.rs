//! Gaussian kernel generation.
//!
//! The 2D kernel is the outer product of a sampled 1D Gaussian with itself,
//! rescaled so its peak is exactly 1.0.
//!
//! ```text
//! g(x) = 1 / (sqrt(2π)·σ) · exp(-((x - μ) / σ)² / 2)
//! K[i, j] = g(x_i) · g(x_j) / max(g ⊗ g)
//! ```

use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};

use crate::buffer::max_value;
use crate::error::{ProcessError, ProcessResult};

/// Evaluate the Gaussian probability density at every point of `x`.
///
/// `sigma` must be non-zero; zero yields NaN/inf samples.
pub fn gaussian_distribution<S>(x: &ArrayBase<S, Ix1>, mu: f64, sigma: f64) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let scale = 1.0 / ((2.0 * PI).sqrt() * sigma);
    x.mapv(|v| scale * (-((v - mu) / sigma).powi(2) / 2.0).exp())
}

/// Build a `size × size` Gaussian kernel with values in `(0, 1]`.
///
/// Sample points are `size` equally spaced values spanning
/// `[-(size / 2), size / 2]` (integer division), so even sizes are sampled
/// off-grid. The peak sits at the center for `mu == 0`.
pub fn generate_gaussian_kernel(size: usize, sigma: f64, mu: f64) -> ProcessResult<Array2<f64>> {
    if size == 0 {
        return Err(ProcessError::DegenerateInput("kernel size must be positive"));
    }
    if sigma == 0.0 || !sigma.is_finite() {
        return Err(ProcessError::DegenerateInput("gaussian sigma must be finite and non-zero"));
    }

    let half = (size / 2) as f64;
    let points = Array1::linspace(-half, half, size);
    let kernel_1d = gaussian_distribution(&points, mu, sigma);

    let kernel_2d = Array2::from_shape_fn((size, size), |(i, j)| kernel_1d[i] * kernel_1d[j]);

    let peak = max_value(&kernel_2d);
    if peak <= 0.0 || !peak.is_finite() {
        return Err(ProcessError::DegenerateInput("gaussian kernel underflowed to zero"));
    }
    Ok(kernel_2d.mapv_into(|v| v / peak))
}
