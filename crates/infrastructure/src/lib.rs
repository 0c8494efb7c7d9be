//! DNS Race Infrastructure Layer
//!
//! Wire format, sockets and the handler chain around the race engine.
pub mod dns;
