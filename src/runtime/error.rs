use crate::formats::IoError;
use crate::remote::RemoteError;
use crate::session::SessionError;
use crate::workflow::RecipeError;
use thiserror::Error;

use super::ConfigError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("image service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("recipe error: {0}")]
    Recipe(#[from] RecipeError),

    #[error("invalid argument: {0}")]
    Argument(String),
}
