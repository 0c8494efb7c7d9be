use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Upstream {server} failed: {reason}")]
    ResolveFailed { server: String, reason: String },

    #[error("Upstream returned no addresses")]
    EmptyResult,

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to write response: {0}")]
    ResponseWrite(String),
}
