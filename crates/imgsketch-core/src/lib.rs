//! imgsketch core — pixel-level image transforms.
//!
//! Gaussian blur over a generated kernel and a direct 2D convolution,
//! grayscale reduction, photometric inversion, color-dodge blending, and
//! the buffer primitives they share. Every transform is a pure function
//! returning a new [`PixelBuffer`]; load/save adapters sit at the edge.

pub mod buffer;
pub mod error;
pub mod filter;
pub mod image;
pub mod io;
pub mod orientation;
pub mod photometric;
pub mod sketch;

// Re-exports for convenience.
pub use buffer::{is_grayscale, normalize, pad};
pub use error::{ProcessError, ProcessResult};
pub use filter::{BlurParams, convolve2d, gaussian_blur, generate_gaussian_kernel};
pub use self::image::PixelBuffer;
pub use io::{load_image, save_image};
pub use orientation::rotate90;
pub use photometric::{color_dodge, invert, rgb_to_gray};
pub use sketch::{SketchParams, pencil_sketch};
