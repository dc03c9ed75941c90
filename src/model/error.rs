use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("sample count mismatch: {width}x{height} buffer needs {expected} samples but got {actual}")]
    SampleCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid colour `{0}`: expected #rrggbb")]
    InvalidColor(String),
}
