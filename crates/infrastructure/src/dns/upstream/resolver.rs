use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::Transport;
use async_trait::async_trait;
use dns_race_application::UpstreamLookup;
use dns_race_domain::{DnsQuery, DomainError, Endpoint};
use hickory_proto::op::ResponseCode;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Network implementation of [`UpstreamLookup`]: one recursive query over UDP,
/// retried over TCP when the reply is truncated.
pub struct UpstreamResolver {
    timeout: Duration,
}

impl UpstreamResolver {
    /// `timeout` bounds the whole exchange with one endpoint, TCP retry included.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(
        &self,
        endpoint: &Endpoint,
        query: &DnsQuery,
    ) -> Result<DnsResponse, DomainError> {
        let start = Instant::now();
        let (id, query_bytes) =
            MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;

        let udp = Transport::udp(endpoint.addr());
        let response = udp.send(&query_bytes, self.timeout).await?;
        debug!(server = %endpoint, protocol = response.protocol_used, "Upstream replied");
        let response = Self::parse_matching(id, &response.bytes)?;

        if !response.truncated {
            return Ok(response);
        }

        let tcp = Transport::tcp(endpoint.addr());
        debug!(
            server = %endpoint,
            protocol = tcp.protocol_name(),
            "Response truncated (TC bit), retrying"
        );

        let remaining = self
            .timeout
            .checked_sub(start.elapsed())
            .filter(|d| !d.is_zero())
            .ok_or(DomainError::QueryTimeout)?;

        let response = tcp.send(&query_bytes, remaining).await?;
        Self::parse_matching(id, &response.bytes)
    }

    fn parse_matching(id: u16, bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let response = ResponseParser::parse(bytes)?;
        if response.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} does not match query id {}",
                response.id, id
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamLookup for UpstreamResolver {
    async fn lookup(
        &self,
        endpoint: &Endpoint,
        query: &DnsQuery,
    ) -> Result<Vec<IpAddr>, DomainError> {
        debug!(domain = %query.domain, server = %endpoint, "Querying upstream");

        let response = self.exchange(endpoint, query).await?;

        match response.rcode {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => return Err(DomainError::EmptyResult),
            rcode => {
                return Err(DomainError::ResolveFailed {
                    server: endpoint.to_string(),
                    reason: ResponseParser::rcode_to_status(rcode).to_string(),
                })
            }
        }

        let addresses: Vec<IpAddr> = response
            .addresses
            .into_iter()
            .filter(|addr| query.record_type.accepts(addr))
            .collect();

        if addresses.is_empty() {
            return Err(DomainError::EmptyResult);
        }
        Ok(addresses)
    }
}
