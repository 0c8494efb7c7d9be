use super::{DnsHandler, ResponseWriter};
use crate::dns::forwarding::RecordTypeMapper;
use crate::dns::synthesizer::AnswerSynthesizer;
use async_trait::async_trait;
use dns_race_application::{RaceCoordinator, RaceVerdict};
use dns_race_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error};

/// Answers address questions from the fastest upstream; defers everything
/// else, and every failure, to `next`.
pub struct RacingHandler {
    coordinator: Arc<RaceCoordinator>,
    synthesizer: AnswerSynthesizer,
    next: Arc<dyn DnsHandler>,
}

impl RacingHandler {
    pub fn new(
        coordinator: Arc<RaceCoordinator>,
        synthesizer: AnswerSynthesizer,
        next: Arc<dyn DnsHandler>,
    ) -> Self {
        Self {
            coordinator,
            synthesizer,
            next,
        }
    }

    fn question(request: &Message) -> Option<DnsQuery> {
        let query = request.queries().first()?;
        Some(DnsQuery::new(
            query.name().to_utf8(),
            RecordTypeMapper::from_hickory(query.query_type()),
        ))
    }

    async fn defer(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        debug!(id = request.id(), next = self.next.name(), "Falling through to next handler");
        self.next.serve(request, writer).await
    }
}

#[async_trait]
impl DnsHandler for RacingHandler {
    fn name(&self) -> &'static str {
        "race"
    }

    async fn serve(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        let Some(query) = Self::question(request) else {
            debug!(id = request.id(), "Request carries no question");
            return self.defer(request, writer).await;
        };

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            upstreams = self.coordinator.endpoints().len(),
            "Received query"
        );

        if !query.is_address_query() {
            return self.defer(request, writer).await;
        }

        let outcome = match self.coordinator.race(&query).await {
            RaceVerdict::Winner(outcome) => outcome,
            RaceVerdict::Unresolved => return self.defer(request, writer).await,
        };

        debug!(
            domain = %query.domain,
            server = %outcome.endpoint,
            addresses = outcome.addresses.len(),
            "Winner selected"
        );

        let reply = self.synthesizer.synthesize(request, &outcome);
        match writer.write_msg(&reply).await {
            Ok(()) => Ok(ResponseCode::NoError),
            Err(e) => {
                error!(domain = %query.domain, error = %e, "Failed to write response");
                self.defer(request, writer).await
            }
        }
    }
}
