use crate::formats::IoError;
use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to `{endpoint}` failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("`{endpoint}` answered with status {code}: {body}")]
    Status {
        endpoint: String,
        code: u16,
        body: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response payload failure: {0}")]
    Payload(#[from] IoError),

    #[error("response pixel buffer failure: {0}")]
    Core(#[from] CoreError),

    #[error("response body read failure: {0}")]
    Io(#[from] std::io::Error),
}
