//! DNS Race Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod endpoint;
pub mod errors;
pub mod outcome;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use endpoint::{Endpoint, EndpointSet, DEFAULT_DNS_PORT};
pub use errors::DomainError;
pub use outcome::{Outcome, OutcomeError};
