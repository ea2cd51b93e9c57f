pub mod config;
pub mod health;
pub mod info;
pub mod process;

use std::path::Path;

use anyhow::{Context, Result};
use filmgrain_core::config::ClientConfig;
use tracing::debug;

/// Load the config file if one was given, else defaults. `endpoint`
/// overrides the configured base URL.
pub(crate) fn resolve_config(path: Option<&Path>, endpoint: Option<&str>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = endpoint {
        config.endpoint.base_url = url.to_string();
    }
    debug!(base_url = %config.endpoint.base_url, "config resolved");
    Ok(config)
}
