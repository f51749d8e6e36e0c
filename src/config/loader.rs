//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// Environment variable overriding the configured API base URL.
pub const BASE_URL_ENV: &str = "INTAKE_API_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ClientConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

impl ClientConfig {
    /// Defaults with environment overrides applied; no config file needed.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_env_overrides(&mut config);
        config
    }
}

fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        if !base_url.is_empty() {
            tracing::debug!(%base_url, "API base URL overridden from environment");
            config.api.base_url = base_url;
        }
    }
}
