//! Handle-or-defer chain in front of the DNS-serving transport.

pub mod logging_writer;
pub mod racing;
pub mod servfail;

use async_trait::async_trait;
use dns_race_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};

pub use logging_writer::LoggingResponseWriter;
pub use racing::RacingHandler;
pub use servfail::ServFailHandler;

/// Output sink for one request.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError>;

    /// Whether a reply has already gone out through this writer.
    fn written(&self) -> bool;
}

/// One link of the handler chain. A handler either answers through the
/// writer or passes the untouched request to the next link.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn serve(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError>;
}
