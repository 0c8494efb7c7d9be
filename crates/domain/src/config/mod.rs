//! Configuration module for DNS Race
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener binding
//! - `race`: Upstream servers and per-worker timeouts
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod race;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use race::RaceConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
