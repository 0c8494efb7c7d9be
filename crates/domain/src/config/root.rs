use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{ConfigError, LoggingConfig, RaceConfig, ServerConfig};
use crate::EndpointSet;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub race: RaceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    /// Replaces `race.servers` when non-empty.
    pub servers: Vec<String>,
    pub dial_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the TOML file (or defaults when no path is given) and applies CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if !overrides.servers.is_empty() {
            self.race.servers = overrides.servers;
        }
        if let Some(timeout) = overrides.dial_timeout_ms {
            self.race.dial_timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.listen_address()?;
        self.race.validate()
    }

    pub fn endpoint_set(&self) -> Result<EndpointSet, ConfigError> {
        self.race.endpoint_set()
    }
}
