//! Jurisdiction registry: (state, county FIPS) to property-search URL.
//!
//! Curated county links first, then a state-wide fallback.

pub mod store;
pub mod types;

pub use store::Registry;
pub use types::{
    LinkEntry, LinkSource, LookupResult, RegistryError, RegistryFile, RegistryStats,
    StateFallbackEntry,
};
