use async_trait::async_trait;
use dns_race_application::UpstreamLookup;
use dns_race_domain::{DnsQuery, DomainError, Endpoint};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What a stubbed upstream does when asked.
#[derive(Debug, Clone)]
pub enum Script {
    Answer(Duration, Vec<IpAddr>),
    Fail(Duration),
    Empty(Duration),
    Panic,
}

impl Script {
    pub fn answer(delay_ms: u64, addrs: &[&str]) -> Self {
        Self::Answer(
            Duration::from_millis(delay_ms),
            addrs.iter().map(|a| a.parse().unwrap()).collect(),
        )
    }

    pub fn fail(delay_ms: u64) -> Self {
        Self::Fail(Duration::from_millis(delay_ms))
    }

    pub fn empty(delay_ms: u64) -> Self {
        Self::Empty(Duration::from_millis(delay_ms))
    }
}

/// Deterministic upstreams keyed by endpoint address.
#[derive(Default)]
pub struct StubLookup {
    scripts: HashMap<SocketAddr, Script>,
    calls: AtomicUsize,
    finished: Mutex<Vec<SocketAddr>>,
}

impl StubLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, addr: &str, script: Script) -> Self {
        self.scripts.insert(addr.parse().unwrap(), script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Endpoints whose lookup ran to completion, in completion order.
    pub fn finished(&self) -> Vec<SocketAddr> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamLookup for StubLookup {
    async fn lookup(
        &self,
        endpoint: &Endpoint,
        query: &DnsQuery,
    ) -> Result<Vec<IpAddr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let script = self
            .scripts
            .get(&endpoint.addr())
            .cloned()
            .unwrap_or(Script::Fail(Duration::ZERO));

        let result = match script {
            Script::Answer(delay, addrs) => {
                tokio::time::sleep(delay).await;
                Ok(addrs)
            }
            Script::Fail(delay) => {
                tokio::time::sleep(delay).await;
                Err(DomainError::ResolveFailed {
                    server: endpoint.to_string(),
                    reason: format!("scripted failure for {}", query.domain),
                })
            }
            Script::Empty(delay) => {
                tokio::time::sleep(delay).await;
                Err(DomainError::EmptyResult)
            }
            Script::Panic => panic!("scripted panic"),
        };

        self.finished.lock().unwrap().push(endpoint.addr());
        result
    }
}
