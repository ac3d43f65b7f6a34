use std::path::PathBuf;

/// Errors raised by the pixel transforms and the load/save adapters.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("no such file: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
    #[error("blend inputs should be normalized within the range (0, 1), got max {max_a} and {max_b}")]
    BlendRangeViolation { max_a: f64, max_b: f64 },
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
}

pub type ProcessResult<T> = Result<T, ProcessError>;
