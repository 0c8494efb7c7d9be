use crate::ports::UpstreamLookup;
use dns_race_domain::{DnsQuery, DomainError, Endpoint, Outcome, OutcomeError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs one lookup against one endpoint and reports at most one [`Outcome`].
pub struct ResolverWorker {
    lookup: Arc<dyn UpstreamLookup>,
    endpoint: Endpoint,
    query: DnsQuery,
    cancel: CancellationToken,
    results: mpsc::Sender<Outcome>,
}

impl ResolverWorker {
    pub fn new(
        lookup: Arc<dyn UpstreamLookup>,
        endpoint: Endpoint,
        query: DnsQuery,
        cancel: CancellationToken,
        results: mpsc::Sender<Outcome>,
    ) -> Self {
        Self {
            lookup,
            endpoint,
            query,
            cancel,
            results,
        }
    }

    /// Performs the lookup and folds the result into an [`Outcome`].
    pub async fn resolve(&self) -> Outcome {
        let name = Arc::clone(&self.query.domain);

        match self.lookup.lookup(&self.endpoint, &self.query).await {
            Ok(addresses) => {
                debug!(
                    server = %self.endpoint,
                    domain = %name,
                    addresses = addresses.len(),
                    "Upstream answered"
                );
                Outcome::resolved(name, self.endpoint, addresses)
            }
            Err(DomainError::EmptyResult) => {
                debug!(server = %self.endpoint, domain = %name, "Upstream has no addresses");
                Outcome::failed(name, self.endpoint, OutcomeError::NotFound)
            }
            Err(e) => {
                debug!(server = %self.endpoint, domain = %name, error = %e, "Upstream failed");
                Outcome::failed(name, self.endpoint, OutcomeError::Resolve(e.to_string()))
            }
        }
    }

    /// Resolves and delivers. Returns `true` if the outcome reached the coordinator.
    ///
    /// Cancellation is only checked here, after the lookup: an in-flight
    /// network call is never interrupted. Delivery uses `try_send`, so a worker
    /// never blocks on a coordinator that stopped listening.
    pub async fn run(self) -> bool {
        let outcome = self.resolve().await;

        if self.cancel.is_cancelled() {
            debug!(server = %self.endpoint, "Race already decided, dropping outcome");
            return false;
        }

        match self.results.try_send(outcome) {
            Ok(()) => true,
            Err(e) => {
                debug!(server = %self.endpoint, error = %e, "Outcome not delivered");
                false
            }
        }
    }
}
