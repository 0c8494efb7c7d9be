#![allow(dead_code)]
pub mod stub_lookup;

pub use stub_lookup::{Script, StubLookup};
