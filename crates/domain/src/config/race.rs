use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;
use crate::EndpointSet;

/// Race settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RaceConfig {
    /// Upstream server tokens: `ipv4` or `ipv4:port` (e.g., "8.8.8.8", "1.1.1.1:53")
    #[serde(default)]
    pub servers: Vec<String>,

    /// Per-worker network timeout in milliseconds (default: 2000)
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,

    /// TTL written on every synthesized address record (default: 60)
    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            dial_timeout_ms: default_dial_timeout_ms(),
            answer_ttl: default_answer_ttl(),
        }
    }
}

impl RaceConfig {
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn endpoint_set(&self) -> Result<EndpointSet, ConfigError> {
        EndpointSet::parse(&self.servers)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dial_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "race.dial_timeout_ms must be greater than 0".to_string(),
            ));
        }
        self.endpoint_set().map(|_| ())
    }
}

fn default_dial_timeout_ms() -> u64 {
    2000
}

fn default_answer_ttl() -> u32 {
    60
}
