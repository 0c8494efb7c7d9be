pub mod forwarding;
pub mod handler;
pub mod server;
pub mod synthesizer;
pub mod transport;
pub mod upstream;

pub use handler::{
    DnsHandler, LoggingResponseWriter, RacingHandler, ResponseWriter, ServFailHandler,
};
pub use server::{ChainRequestHandler, HickoryResponseWriter, MIN_UDP_PAYLOAD};
pub use synthesizer::{AnswerSynthesizer, DEFAULT_ANSWER_TTL};
pub use upstream::UpstreamResolver;
