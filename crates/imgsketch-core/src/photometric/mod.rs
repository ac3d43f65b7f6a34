//! Color and photometric transforms — grayscale reduction, inversion, and blending.

pub mod blend;
pub mod grayscale;
pub mod invert;

pub use blend::color_dodge;
pub use grayscale::{LUMA_WEIGHTS, rgb_to_gray};
pub use invert::invert;
