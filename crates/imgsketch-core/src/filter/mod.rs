//! Spatial filtering — Gaussian kernel generation, direct 2D convolution,
//! and Gaussian blur built from the two.

pub mod blur;
pub mod convolve;
pub mod kernel;

pub use blur::{BlurParams, gaussian_blur};
pub use convolve::{convolve2d, correlate_centered};
pub use kernel::{gaussian_distribution, generate_gaussian_kernel};
