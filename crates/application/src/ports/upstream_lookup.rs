use async_trait::async_trait;
use dns_race_domain::{DnsQuery, DomainError, Endpoint};
use std::net::IpAddr;

/// One address lookup against one upstream, using it as the only resolution server.
///
/// Implementations bound their own network time; the race never imposes a
/// deadline of its own.
#[async_trait]
pub trait UpstreamLookup: Send + Sync {
    async fn lookup(
        &self,
        endpoint: &Endpoint,
        query: &DnsQuery,
    ) -> Result<Vec<IpAddr>, DomainError>;
}
