use super::response_writer::HickoryResponseWriter;
use crate::dns::handler::{DnsHandler, LoggingResponseWriter, ResponseWriter, ServFailHandler};
use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error};

/// Entry point `ServerFuture` calls for every UDP datagram and TCP message.
pub struct ChainRequestHandler {
    chain: Arc<dyn DnsHandler>,
}

impl ChainRequestHandler {
    pub fn new(chain: Arc<dyn DnsHandler>) -> Self {
        Self { chain }
    }

    /// Rebuilds the request as a plain message: header flags, the question
    /// (when there is one) and the client's EDNS.
    fn request_message(request: &Request) -> Message {
        let header = request.header();
        let mut message = Message::new(header.id(), header.message_type(), header.op_code());
        message.set_recursion_desired(header.recursion_desired());
        message.set_checking_disabled(header.checking_disabled());

        if let Ok(info) = request.request_info() {
            message.add_query(info.query.original().clone());
        }
        if let Some(edns) = request.edns() {
            *message.extensions_mut() = Some(edns.clone());
        }
        message
    }
}

#[async_trait]
impl RequestHandler for ChainRequestHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        let message = Self::request_message(request);
        debug!(
            src = %request.src(),
            protocol = %request.protocol(),
            id = message.id(),
            "Request received"
        );

        let mut writer =
            LoggingResponseWriter::new(HickoryResponseWriter::new(request, response_handle));

        if let Err(e) = self.chain.serve(&message, &mut writer).await {
            error!(src = %request.src(), handler = self.chain.name(), error = %e, "Handler failed");
            if !writer.written() {
                if let Err(e) = writer.write_msg(&ServFailHandler::reply(&message)).await {
                    error!(src = %request.src(), error = %e, "Failed to write SERVFAIL");
                }
            }
        }

        writer
            .into_inner()
            .info()
            .unwrap_or_else(|| ResponseInfo::from(*ServFailHandler::reply(&message).header()))
    }
}
