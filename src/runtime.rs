mod config;
mod context;
mod error;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, ServiceConfig, load_config};
pub use context::AppContext;
pub use error::{AppError, Result};
