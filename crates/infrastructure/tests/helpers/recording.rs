use async_trait::async_trait;
use dns_race_application::UpstreamLookup;
use dns_race_domain::{DnsQuery, DomainError, Endpoint};
use dns_race_infrastructure::dns::{DnsHandler, ResponseWriter};
use hickory_proto::op::{Message, ResponseCode};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Captures every reply instead of sending it.
#[derive(Default)]
pub struct RecordingWriter {
    pub messages: Vec<Message>,
}

#[async_trait]
impl ResponseWriter for RecordingWriter {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        self.messages.push(message.clone());
        Ok(())
    }

    fn written(&self) -> bool {
        !self.messages.is_empty()
    }
}

/// Transport that rejects every reply.
#[derive(Default)]
pub struct FailingWriter {
    pub attempts: usize,
}

#[async_trait]
impl ResponseWriter for FailingWriter {
    async fn write_msg(&mut self, _message: &Message) -> Result<(), DomainError> {
        self.attempts += 1;
        Err(DomainError::ResponseWrite("connection reset".to_string()))
    }

    fn written(&self) -> bool {
        false
    }
}

/// Next handler that records what it was given and returns a fixed code.
pub struct RecordingHandler {
    pub requests: Mutex<Vec<Message>>,
    pub code: ResponseCode,
}

impl RecordingHandler {
    pub fn new(code: ResponseCode) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            code,
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Message> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DnsHandler for RecordingHandler {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn serve(
        &self,
        request: &Message,
        _writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.code)
    }
}

/// Immediate upstreams keyed by address; unknown endpoints come back empty.
#[derive(Default)]
pub struct CountingLookup {
    answers: HashMap<SocketAddr, Vec<IpAddr>>,
    calls: AtomicUsize,
}

impl CountingLookup {
    pub fn with(mut self, addr: &str, ips: &[&str]) -> Self {
        self.answers.insert(
            addr.parse().unwrap(),
            ips.iter().map(|ip| ip.parse().unwrap()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamLookup for CountingLookup {
    async fn lookup(
        &self,
        endpoint: &Endpoint,
        _query: &DnsQuery,
    ) -> Result<Vec<IpAddr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(&endpoint.addr()) {
            Some(ips) => Ok(ips.clone()),
            None => Err(DomainError::EmptyResult),
        }
    }
}
