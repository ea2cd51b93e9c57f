use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{FilmGrainError, Result};
use crate::params::GrainParameters;

/// Client configuration, stored as TOML.
///
/// ```toml
/// [endpoint]
/// base_url = "http://localhost:8000"
/// timeout_secs = 120
///
/// [params]
/// scale = 1.0
/// grain_power = 0.75
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub params: GrainParameters,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Scheme, host and optional path prefix of the grain service.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EndpointConfig {
    /// A zero timeout would fail every request immediately.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(FilmGrainError::InvalidParameter(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ClientConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(contents)?;
        config.endpoint.validate()?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
