pub mod upstream_lookup;

pub use upstream_lookup::UpstreamLookup;
