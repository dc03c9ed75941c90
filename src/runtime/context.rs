use std::path::Path;

use tracing::debug;

use crate::remote::HttpImageService;

use super::{Result, ServiceConfig, load_config};

/// Resolved configuration plus the services built from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServiceConfig,
    image_service: HttpImageService,
}

impl Default for AppContext {
    fn default() -> Self {
        let config = ServiceConfig::default();
        let image_service = HttpImageService::new(&config.base_url, config.timeout());
        Self {
            config,
            image_service,
        }
    }
}

impl AppContext {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "building image service client"
        );
        let image_service = HttpImageService::new(&config.base_url, config.timeout());
        Ok(Self {
            config,
            image_service,
        })
    }

    /// Config file (if any) first, then explicit overrides.
    pub fn resolve(
        config_path: Option<&Path>,
        base_url: Option<String>,
        timeout_ms: Option<u64>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };
        Self::new(config.with_overrides(base_url, timeout_ms))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn image_service(&self) -> &HttpImageService {
        &self.image_service
    }
}
