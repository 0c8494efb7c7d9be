//! Adapters that run the handler chain under `hickory-server`'s `ServerFuture`.

pub mod request_handler;
pub mod response_writer;

pub use request_handler::ChainRequestHandler;
pub use response_writer::{HickoryResponseWriter, MIN_UDP_PAYLOAD};
