use crate::dns::forwarding::MessageBuilder;
use crate::dns::handler::ResponseWriter;
use async_trait::async_trait;
use dns_race_domain::DomainError;
use hickory_proto::op::{Edns, Message};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, ResponseHandler, ResponseInfo};
use tracing::debug;

/// Largest reply a UDP client without EDNS(0) accepts (RFC 1035 §4.2.1).
pub const MIN_UDP_PAYLOAD: u16 = 512;

/// Wire size of an OPT record with no options.
const OPT_RECORD_LEN: usize = 11;

/// Writes chain replies through a `hickory-server` response handle.
///
/// Over UDP a reply larger than the client's payload limit goes out as an
/// empty TC=1 response so the client retries over TCP.
pub struct HickoryResponseWriter<'q, R> {
    request: &'q Request,
    handle: R,
    max_payload: Option<u16>,
    edns: Option<Edns>,
    info: Option<ResponseInfo>,
}

impl<'q, R: ResponseHandler> HickoryResponseWriter<'q, R> {
    pub fn new(request: &'q Request, handle: R) -> Self {
        let client_payload = request
            .edns()
            .map(|edns| edns.max_payload().max(MIN_UDP_PAYLOAD));

        let max_payload = if request.protocol().is_datagram() {
            Some(client_payload.unwrap_or(MIN_UDP_PAYLOAD))
        } else {
            None
        };

        let edns = client_payload.map(|payload| {
            let mut edns = Edns::new();
            edns.set_max_payload(payload).set_version(0);
            edns
        });

        Self {
            request,
            handle,
            max_payload,
            edns,
            info: None,
        }
    }

    /// Header summary of the reply that was sent, if any.
    pub fn info(&self) -> Option<ResponseInfo> {
        self.info
    }

    fn exceeds_payload(&self, message: &Message) -> Result<bool, DomainError> {
        let Some(limit) = self.max_payload else {
            return Ok(false);
        };
        let mut len = MessageBuilder::encode(message)?.len();
        if self.edns.is_some() {
            len += OPT_RECORD_LEN;
        }
        Ok(len > usize::from(limit))
    }
}

#[async_trait]
impl<'q, R: ResponseHandler> ResponseWriter for HickoryResponseWriter<'q, R> {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        let truncated;
        let reply = if self.exceeds_payload(message)? {
            debug!(
                id = message.id(),
                answers = message.answers().len(),
                limit = self.max_payload,
                "Reply exceeds client payload, sending TC"
            );
            truncated = message.truncate();
            &truncated
        } else {
            message
        };

        let mut builder = MessageResponseBuilder::from_message_request(self.request);
        if let Some(edns) = self.edns.clone() {
            builder.edns(edns);
        }
        let response = builder.build(
            *reply.header(),
            reply.answers().iter(),
            reply.name_servers().iter(),
            std::iter::empty::<&Record>(),
            reply.additionals().iter(),
        );

        let info = self
            .handle
            .send_response(response)
            .await
            .map_err(|e| DomainError::ResponseWrite(format!("{}: {}", self.request.src(), e)))?;
        self.info = Some(info);
        Ok(())
    }

    fn written(&self) -> bool {
        self.info.is_some()
    }
}
