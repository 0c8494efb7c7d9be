use thiserror::Error;

/// Fatal at load time: the server refuses to start on any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DNS server address {server} is not correct: [{address}] is not an IPv4 address")]
    InvalidServer { server: String, address: String },

    #[error("DNS server address {0} is not correct: too many ':'s")]
    TooManyColons(String),

    #[error("DNS server address {server} is not correct: port [{port}] is not a number")]
    InvalidPort { server: String, port: String },

    #[error("DNS server address {server} is not correct: port [{port}] not between 0 and 65535")]
    PortOutOfRange { server: String, port: i64 },

    #[error("At least one DNS server is required")]
    NoEndpoints,

    #[error("Failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
