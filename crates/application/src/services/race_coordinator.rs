use super::race_state::RaceState;
use super::resolver_worker::ResolverWorker;
use crate::ports::UpstreamLookup;
use dns_race_domain::{DnsQuery, EndpointSet, Outcome};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How a race ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceVerdict {
    /// First outcome that carried addresses and no failure.
    Winner(Outcome),
    /// Every endpoint failed or came back empty.
    Unresolved,
}

impl RaceVerdict {
    pub fn winner(&self) -> Option<&Outcome> {
        match self {
            Self::Winner(outcome) => Some(outcome),
            Self::Unresolved => None,
        }
    }
}

/// Races one lookup per configured endpoint and keeps the first usable answer.
pub struct RaceCoordinator {
    endpoints: EndpointSet,
    lookup: Arc<dyn UpstreamLookup>,
}

impl RaceCoordinator {
    pub fn new(endpoints: EndpointSet, lookup: Arc<dyn UpstreamLookup>) -> Self {
        Self { endpoints, lookup }
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Query all endpoints in parallel, return the fastest usable outcome.
    ///
    /// Outcomes are taken in arrival order. The first one with addresses wins
    /// and fires the cancellation token; workers still in flight finish their
    /// own lookup and then drop their result.
    pub async fn race(&self, query: &DnsQuery) -> RaceVerdict {
        let cancel = CancellationToken::new();
        let mut state = RaceState::new(cancel.clone());

        // Sized to the endpoint count so no worker ever waits on delivery.
        let (tx, mut rx) = mpsc::channel::<Outcome>(self.endpoints.len().max(1));

        debug!(
            strategy = "race",
            servers = self.endpoints.len(),
            domain = %query.domain,
            record_type = %query.record_type,
            "Racing all upstreams"
        );

        for endpoint in self.endpoints.iter() {
            let worker = ResolverWorker::new(
                Arc::clone(&self.lookup),
                *endpoint,
                query.clone(),
                cancel.clone(),
                tx.clone(),
            );
            debug!(server = %endpoint, domain = %query.domain, "Dispatching query");
            tokio::spawn(worker.run());
            state.record_dispatch();
        }
        drop(tx);

        while !state.is_exhausted() {
            // `None` means every sender is gone: the remaining workers died
            // without reporting.
            let Some(outcome) = rx.recv().await else {
                debug!(
                    received = state.received(),
                    dispatched = state.dispatched(),
                    "Workers exited without reporting"
                );
                break;
            };

            let server = outcome.endpoint;
            if state.observe(outcome) {
                debug!(server = %server, domain = %query.domain, "Fastest response");
                break;
            }
            debug!(server = %server, domain = %query.domain, "Outcome discarded");
        }

        match state.into_winner() {
            Some(winner) => RaceVerdict::Winner(winner),
            None => {
                debug!(domain = %query.domain, "No upstream produced an answer");
                RaceVerdict::Unresolved
            }
        }
    }
}
