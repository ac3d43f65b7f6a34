//! Gaussian blur: kernel generation, convolution, then rescale to `[0, 255]`.

use ndarray::{Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::buffer::BYTE_RANGE_END;
use crate::error::ProcessResult;
use crate::filter::convolve::correlate_centered;
use crate::filter::kernel::generate_gaussian_kernel;
use crate::image::PixelBuffer;

/// Default kernel side length.
pub const DEFAULT_KERNEL_SIZE: usize = 21;
/// Default Gaussian standard deviation.
pub const DEFAULT_SIGMA: f64 = 10.0;

/// Parameters for [`gaussian_blur`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Kernel side length (`size × size`). Must be positive.
    pub kernel_size: usize,
    /// Standard deviation of the Gaussian. Must be non-zero.
    pub sigma: f64,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl BlurParams {
    pub fn apply(&self, image: &PixelBuffer) -> ProcessResult<PixelBuffer> {
        gaussian_blur(image, self.kernel_size, self.sigma)
    }
}

/// Blur `image` with a `kernel_size × kernel_size` Gaussian and rescale to `[0, 255]`.
///
/// The kernel is anchored at its center ([`correlate_centered`]), so the
/// blurred image stays registered with its source. The kernel is
/// peak-normalized rather than sum-normalized, so the raw correlation
/// brightens the image; the final rescale by the global maximum brings it
/// back to the byte range. Multi-channel buffers are filtered one channel
/// at a time with the same kernel.
pub fn gaussian_blur(image: &PixelBuffer, kernel_size: usize, sigma: f64) -> ProcessResult<PixelBuffer> {
    tracing::debug!(%image, kernel_size, sigma, "gaussian_blur");
    let kernel = generate_gaussian_kernel(kernel_size, sigma, 0.0)?;

    let blurred = match image {
        PixelBuffer::Gray(gray) => PixelBuffer::Gray(correlate_centered(gray.view(), kernel.view())?),
        PixelBuffer::Color(color) => {
            let mut out = Array3::zeros(color.raw_dim());
            for (plane, mut out_plane) in color.axis_iter(Axis(2)).zip(out.axis_iter_mut(Axis(2))) {
                out_plane.assign(&correlate_centered(plane, kernel.view())?);
            }
            PixelBuffer::Color(out)
        }
    };

    blurred.normalize(BYTE_RANGE_END)
}
