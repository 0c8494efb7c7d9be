//! DNS Race Application Layer
//!
//! The race engine: one worker per upstream, first usable answer wins.
pub mod ports;
pub mod services;

pub use ports::UpstreamLookup;
pub use services::{RaceCoordinator, RaceState, RaceVerdict, ResolverWorker};
