//! Pixel buffer representation shared by every transform.

use std::fmt;

use ndarray::{Array2, Array3, ArrayD, ArrayViewD, Ix2, Ix3};

use crate::buffer;
use crate::error::{ProcessError, ProcessResult};

/// Dense image samples promoted to `f64`.
///
/// `Gray` holds `(H, W)` single-channel data. `Color` holds `(H, W, C)`
/// data with a uniform channel count, typically 3 (RGB) or 4 (RGBA).
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// Single-channel `(H, W)` buffer.
    Gray(Array2<f64>),
    /// Multi-channel `(H, W, C)` buffer.
    Color(Array3<f64>),
}

impl PixelBuffer {
    /// Wrap a dynamically-shaped array.
    ///
    /// Anything other than 2 or 3 axes is a [`ProcessError::TypeMismatch`];
    /// an empty axis is a [`ProcessError::DegenerateInput`].
    pub fn from_dyn(array: ArrayD<f64>) -> ProcessResult<Self> {
        if array.shape().contains(&0) {
            return Err(ProcessError::DegenerateInput("buffer has a zero-length axis"));
        }
        let to_type_error = |e: ndarray::ShapeError| ProcessError::TypeMismatch(e.to_string());
        match array.ndim() {
            2 => Ok(Self::Gray(array.into_dimensionality::<Ix2>().map_err(to_type_error)?)),
            3 => Ok(Self::Color(array.into_dimensionality::<Ix3>().map_err(to_type_error)?)),
            n => Err(ProcessError::TypeMismatch(format!(
                "expected an (H, W) or (H, W, C) buffer, got {n} axes"
            ))),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Gray(a) => a.shape(),
            Self::Color(a) => a.shape(),
        }
    }

    pub fn height(&self) -> usize {
        self.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.shape()[1]
    }

    /// Channel count; 1 for `Gray`.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray(_) => 1,
            Self::Color(a) => a.dim().2,
        }
    }

    /// Largest sample, `-inf` for an empty buffer.
    pub fn max_value(&self) -> f64 {
        match self {
            Self::Gray(a) => buffer::max_value(a),
            Self::Color(a) => buffer::max_value(a),
        }
    }

    /// Smallest sample, `+inf` for an empty buffer.
    pub fn min_value(&self) -> f64 {
        match self {
            Self::Gray(a) => buffer::min_value(a),
            Self::Color(a) => buffer::min_value(a),
        }
    }

    /// See [`buffer::is_grayscale`].
    pub fn is_grayscale(&self) -> bool {
        buffer::is_grayscale(self)
    }

    /// Rescale to `[0, range_end]` by the buffer's own maximum. See [`buffer::normalize`].
    pub fn normalize(&self, range_end: f64) -> ProcessResult<Self> {
        Ok(match self {
            Self::Gray(a) => Self::Gray(buffer::normalize(a, range_end)?),
            Self::Color(a) => Self::Color(buffer::normalize(a, range_end)?),
        })
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Gray(a) => Self::Gray(a.mapv(f)),
            Self::Color(a) => Self::Color(a.mapv(f)),
        }
    }

    pub fn view_dyn(&self) -> ArrayViewD<'_, f64> {
        match self {
            Self::Gray(a) => a.view().into_dyn(),
            Self::Color(a) => a.view().into_dyn(),
        }
    }

    pub fn into_dyn(self) -> ArrayD<f64> {
        match self {
            Self::Gray(a) => a.into_dyn(),
            Self::Color(a) => a.into_dyn(),
        }
    }
}

impl From<Array2<f64>> for PixelBuffer {
    fn from(array: Array2<f64>) -> Self {
        Self::Gray(array)
    }
}

impl From<Array3<f64>> for PixelBuffer {
    fn from(array: Array3<f64>) -> Self {
        Self::Color(array)
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gray(a) => write!(f, "{}x{} gray", a.nrows(), a.ncols()),
            Self::Color(a) => {
                let (h, w, c) = a.dim();
                write!(f, "{h}x{w}x{c}")
            }
        }
    }
}
