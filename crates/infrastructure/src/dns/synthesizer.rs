use dns_race_domain::Outcome;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use std::net::IpAddr;

pub const DEFAULT_ANSWER_TTL: u32 = 60;

/// Turns a winning [`Outcome`] into the reply for the inbound request.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSynthesizer {
    ttl: u32,
}

impl Default for AnswerSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_TTL)
    }
}

impl AnswerSynthesizer {
    pub fn new(ttl: u32) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Authoritative reply with one A/AAAA record per resolved address,
    /// owned by the request's question name.
    pub fn synthesize(&self, request: &Message, outcome: &Outcome) -> Message {
        let mut reply = reply_to(request);
        reply.set_authoritative(true);

        let owner = request
            .queries()
            .first()
            .map(|q| q.name().clone())
            .or_else(|| Name::from_utf8(&*outcome.name).ok())
            .unwrap_or_else(Name::root);

        for addr in &outcome.addresses {
            let rdata = match addr {
                IpAddr::V4(v4) => RData::A(A(*v4)),
                IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
            };
            reply.add_answer(Record::from_rdata(owner.clone(), self.ttl, rdata));
        }

        reply
    }
}

/// Empty NOERROR reply mirroring the request's id, opcode, flags and question.
/// RA is always set: answers come from recursive upstreams.
pub fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_checking_disabled(request.checking_disabled());
    reply.set_response_code(ResponseCode::NoError);
    for query in request.queries() {
        reply.add_query(query.clone());
    }
    reply
}
