use crate::image::PixelBuffer;

/// Photometric inversion around the buffer's own maximum: `max(image) - image`.
///
/// An 8-bit image whose brightest sample is 200 inverts around 200, not 255.
/// Applying it twice yields `image - min(image)`, which is the original
/// image whenever its minimum is 0.
pub fn invert(image: &PixelBuffer) -> PixelBuffer {
    let max = image.max_value();
    image.map(|v| max - v)
}
