#![allow(dead_code)]
pub mod dns_server_mock;
pub mod recording;

pub use dns_server_mock::{Behaviour, MockDnsServer};
pub use recording::{CountingLookup, FailingWriter, RecordingHandler, RecordingWriter};
