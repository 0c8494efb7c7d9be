use super::ResponseWriter;
use async_trait::async_trait;
use dns_race_domain::DomainError;
use hickory_proto::op::Message;
use tracing::info;

/// Decorates a writer with one log line per outgoing reply.
pub struct LoggingResponseWriter<W> {
    inner: W,
}

impl<W: ResponseWriter> LoggingResponseWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[async_trait]
impl<W: ResponseWriter> ResponseWriter for LoggingResponseWriter<W> {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        info!(
            id = message.id(),
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            "Writing response"
        );
        self.inner.write_msg(message).await
    }

    fn written(&self) -> bool {
        self.inner.written()
    }
}
