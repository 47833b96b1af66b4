//! Runtime configuration and defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the US Census geocoder.
pub const CENSUS_GEOCODER_URL: &str = "https://geocoding.geo.census.gov/geocoder";

/// Census address-range benchmark used for both lookups.
pub const DEFAULT_BENCHMARK: &str = "2020";

/// Census geography vintage for the coordinate lookup.
pub const DEFAULT_VINTAGE: &str = "2020";

/// Per-call HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// User agent sent on every outbound request.
pub const USER_AGENT: &str = concat!("parcel-link/", env!("CARGO_PKG_VERSION"));

/// Settings for the outbound geocoder.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub benchmark: String,
    pub vintage: String,
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: CENSUS_GEOCODER_URL.to_string(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
            vintage: DEFAULT_VINTAGE.to_string(),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl GeocoderConfig {
    /// `{base}/locations/onelineaddress`
    pub fn address_url(&self) -> String {
        format!("{}/locations/onelineaddress", self.base_url.trim_end_matches('/'))
    }

    /// `{base}/geographies/coordinates`
    pub fn coordinates_url(&self) -> String {
        format!("{}/geographies/coordinates", self.base_url.trim_end_matches('/'))
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Registry file to load instead of the built-in one.
    pub registry: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            registry: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = GeocoderConfig::default();
        assert_eq!(
            config.address_url(),
            "https://geocoding.geo.census.gov/geocoder/locations/onelineaddress"
        );
        assert_eq!(
            config.coordinates_url(),
            "https://geocoding.geo.census.gov/geocoder/geographies/coordinates"
        );
    }

    #[test]
    fn test_trailing_slash() {
        let config = GeocoderConfig {
            base_url: "http://localhost:9000/geocoder/".into(),
            ..GeocoderConfig::default()
        };
        assert_eq!(config.address_url(), "http://localhost:9000/geocoder/locations/onelineaddress");
    }

    #[test]
    fn test_bind_addr() {
        assert_eq!(ServerConfig::default().bind_addr(), "127.0.0.1:3000");
    }
}
