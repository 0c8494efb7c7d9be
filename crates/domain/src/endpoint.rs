use crate::config::ConfigError;
use std::collections::HashSet;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// One upstream resolver address taking part in every race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    addr: SocketAddr,
}

impl Endpoint {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Parses a server token: `ipv4` (port 53) or `ipv4:port`.
    ///
    /// Ports must satisfy `0 < port < 65535`.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = token.split(':').collect();

        let (ip, port) = match parts.as_slice() {
            [ip] => (parse_ipv4(token, ip)?, DEFAULT_DNS_PORT),
            [ip, port] => (parse_ipv4(token, ip)?, parse_port(token, port)?),
            _ => return Err(ConfigError::TooManyColons(token.to_string())),
        };

        Ok(Self::new(SocketAddr::V4(SocketAddrV4::new(ip, port))))
    }
}

fn parse_ipv4(token: &str, ip: &str) -> Result<Ipv4Addr, ConfigError> {
    ip.parse::<Ipv4Addr>()
        .map_err(|_| ConfigError::InvalidServer {
            server: token.to_string(),
            address: ip.to_string(),
        })
}

fn parse_port(token: &str, port: &str) -> Result<u16, ConfigError> {
    let value: i64 = port.parse().map_err(|_| ConfigError::InvalidPort {
        server: token.to_string(),
        port: port.to_string(),
    })?;

    if value > 0 && value < i64::from(u16::MAX) {
        Ok(value as u16)
    } else {
        Err(ConfigError::PortOutOfRange {
            server: token.to_string(),
            port: value,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

impl FromStr for Endpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Validated, deduplicated upstream list.
///
/// Built once per configuration load and never mutated afterwards; clones share
/// the same backing slice, so every concurrent race reads the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    endpoints: Arc<[Endpoint]>,
}

impl EndpointSet {
    /// Validates every token and keeps the first occurrence of each `ip:port`.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut endpoints = Vec::new();

        for token in tokens {
            let endpoint = Endpoint::parse(token.as_ref().trim())?;
            if seen.insert(endpoint) {
                endpoints.push(endpoint);
            }
        }

        Self::from_endpoints(endpoints)
    }

    /// Parses a one-line directive such as `race 8.8.8.8 1.1.1.1:53`.
    /// The first token names the directive and is skipped.
    pub fn from_directive(line: &str) -> Result<Self, ConfigError> {
        Self::parse(line.split_whitespace().skip(1))
    }

    pub fn from_endpoints(endpoints: Vec<Endpoint>) -> Result<Self, ConfigError> {
        if endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        Ok(Self {
            endpoints: Arc::from(endpoints),
        })
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn as_slice(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn contains(&self, addr: SocketAddr) -> bool {
        self.endpoints.iter().any(|e| e.addr() == addr)
    }
}

impl fmt::Display for EndpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.endpoints.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", joined.join(", "))
    }
}
