//! Portrait correction by quarter turns.

use ndarray::{Array, ArrayView, Axis, Dimension};

use crate::image::PixelBuffer;

/// Rotate a landscape buffer (`height < width`) by `k × 90°` counter-clockwise.
///
/// Portrait and square buffers are returned unchanged. Negative `k` turns
/// clockwise. Only the first two axes move; channels stay in place.
pub fn rotate90(image: &PixelBuffer, k: i32) -> PixelBuffer {
    if image.height() >= image.width() {
        return image.clone();
    }
    tracing::debug!(%image, k, "rotate90");
    match image {
        PixelBuffer::Gray(a) => PixelBuffer::Gray(rot90(a.view(), k)),
        PixelBuffer::Color(a) => PixelBuffer::Color(rot90(a.view(), k)),
    }
}

fn rot90<D: Dimension>(mut view: ArrayView<'_, f64, D>, k: i32) -> Array<f64, D> {
    match k.rem_euclid(4) {
        0 => {}
        1 => {
            view.invert_axis(Axis(1));
            view.swap_axes(0, 1);
        }
        2 => {
            view.invert_axis(Axis(0));
            view.invert_axis(Axis(1));
        }
        _ => {
            view.invert_axis(Axis(0));
            view.swap_axes(0, 1);
        }
    }
    view.as_standard_layout().into_owned()
}
