pub mod race_coordinator;
pub mod race_state;
pub mod resolver_worker;

pub use race_coordinator::{RaceCoordinator, RaceVerdict};
pub use race_state::RaceState;
pub use resolver_worker::ResolverWorker;
