use super::{DnsHandler, ResponseWriter};
use crate::dns::synthesizer::reply_to;
use async_trait::async_trait;
use dns_race_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};

/// End of the chain: answers SERVFAIL for whatever reaches it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServFailHandler;

impl ServFailHandler {
    pub fn reply(request: &Message) -> Message {
        let mut reply = reply_to(request);
        reply.set_response_code(ResponseCode::ServFail);
        reply
    }
}

#[async_trait]
impl DnsHandler for ServFailHandler {
    fn name(&self) -> &'static str {
        "servfail"
    }

    async fn serve(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        writer.write_msg(&Self::reply(request)).await?;
        Ok(ResponseCode::ServFail)
    }
}
