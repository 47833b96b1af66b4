use crate::geocode::GeocodeResolver;
use crate::http::UreqTransport;
use crate::registry::Registry;

/// Shared, read-only after startup.
pub struct AppState<T = UreqTransport> {
    pub resolver: GeocodeResolver<T>,
    pub registry: Registry,
}
