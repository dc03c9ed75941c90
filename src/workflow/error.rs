use crate::formats::IoError;
use crate::session::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecipeError>;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe parse failure: {0}")]
    Parse(String),

    #[error("recipe I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("recipe serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("recipe YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("image layer source failure: {0}")]
    Image(#[from] IoError),

    #[error("recipe step failed: {0}")]
    Session(#[from] SessionError),
}
