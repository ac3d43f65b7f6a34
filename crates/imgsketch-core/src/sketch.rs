//! Pencil-sketch pipeline composed from the core transforms.
//!
//! # Algorithm
//! 1. Optional portrait correction (`rotate_turns` quarter turns)
//! 2. Reduce to grayscale
//! 3. Invert around the grayscale maximum
//! 4. Gaussian-blur the inverted image
//! 5. Color-dodge the grayscale image under the blurred inversion,
//!    both rescaled to `[0, 1]` first
//!
//! The result is a single-channel buffer in `[0, 255]`.

use serde::{Deserialize, Serialize};

use crate::buffer::UNIT_RANGE_END;
use crate::error::ProcessResult;
use crate::filter::BlurParams;
use crate::image::PixelBuffer;
use crate::orientation::rotate90;
use crate::photometric::{color_dodge, invert, rgb_to_gray};

/// Tunables for [`pencil_sketch`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SketchParams {
    /// Blur applied to the inverted grayscale image.
    #[serde(flatten)]
    pub blur: BlurParams,
    /// Quarter turns applied to landscape input. 0 disables the correction.
    pub rotate_turns: i32,
}

/// Turn a photograph into a pencil-style sketch.
pub fn pencil_sketch(image: &PixelBuffer, params: &SketchParams) -> ProcessResult<PixelBuffer> {
    tracing::debug!(%image, ?params, "pencil_sketch");

    let rotated;
    let image = if params.rotate_turns != 0 {
        rotated = rotate90(image, params.rotate_turns);
        &rotated
    } else {
        image
    };

    let gray = rgb_to_gray(image)?;
    let blurred = params.blur.apply(&invert(&gray))?;

    let front = blurred.normalize(UNIT_RANGE_END)?;
    let back = gray.normalize(UNIT_RANGE_END)?;
    color_dodge(&front, &back)
}
