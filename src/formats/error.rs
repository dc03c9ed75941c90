use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("base64 decode failure: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("core pixel buffer failure: {0}")]
    Core(#[from] CoreError),
}
