use crate::Endpoint;
use std::net::IpAddr;
use std::sync::Arc;

/// Why a worker's attempt cannot win a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// Network, timeout or protocol failure talking to the endpoint.
    Resolve(String),
    /// The exchange succeeded but produced no addresses.
    NotFound,
}

/// Result of one worker's lookup against one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: Arc<str>,
    pub endpoint: Endpoint,
    pub addresses: Vec<IpAddr>,
    pub error: Option<OutcomeError>,
}

impl Outcome {
    pub fn resolved(name: Arc<str>, endpoint: Endpoint, addresses: Vec<IpAddr>) -> Self {
        let error = if addresses.is_empty() {
            Some(OutcomeError::NotFound)
        } else {
            None
        };
        Self {
            name,
            endpoint,
            addresses,
            error,
        }
    }

    pub fn failed(name: Arc<str>, endpoint: Endpoint, error: OutcomeError) -> Self {
        Self {
            name,
            endpoint,
            addresses: Vec::new(),
            error: Some(error),
        }
    }

    /// No failure and at least one address.
    pub fn is_winner(&self) -> bool {
        self.error.is_none() && !self.addresses.is_empty()
    }
}
