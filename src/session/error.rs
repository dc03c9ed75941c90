use crate::remote::RemoteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no image loaded")]
    NoImage,

    #[error("selection is empty: drag a region before cropping")]
    EmptyRegion,

    #[error("remote service call failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("layer stack serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}
