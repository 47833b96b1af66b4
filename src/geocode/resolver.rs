//! Geocode resolver: address to state + county FIPS.
//!
//! Flow:  normalize → address lookup → county from match
//!        → (county missing) coordinate lookup, failures ignored
//!        → validate state/county → result

use super::census::{self, Coordinates};
use super::types::{GeocodeError, GeocodeResult};
use crate::config::GeocoderConfig;
use crate::fips;
use crate::http::{Transport, UreqTransport};

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_address(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The geocode resolver. Stateless between calls.
pub struct GeocodeResolver<T = UreqTransport> {
    transport: T,
    config: GeocoderConfig,
}

impl GeocodeResolver<UreqTransport> {
    pub fn new(config: GeocoderConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { transport, config }
    }
}

impl<T: Transport> GeocodeResolver<T> {
    /// Create a resolver over a specific transport (for testing).
    pub fn with_transport(transport: T, config: GeocoderConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve an address to its jurisdiction. At most two outbound calls.
    ///
    /// A blank address is `NoMatch` and makes no call.
    pub fn resolve(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let normalized = normalize_address(address);
        if normalized.is_empty() {
            return Err(GeocodeError::NoMatch);
        }

        let matched = census::find_address(&self.transport, &self.config, &normalized)?
            .ok_or(GeocodeError::NoMatch)?;

        let coords = matched.coordinates.unwrap_or_default();
        let components = matched.address_components.unwrap_or_default();

        let state = components.state.unwrap_or_default().trim().to_uppercase();
        let mut county_fips = components
            .county
            .as_ref()
            .and_then(census::code_text)
            .and_then(|raw| fips::county_from_component(&raw));
        let mut county_name = components.county_name;

        if county_fips.is_none() {
            tracing::debug!(address = %normalized, "no county in address match, trying coordinates");
            if let Some((code, name)) = self.county_by_coordinates(coords) {
                county_fips = Some(code);
                county_name = name;
            }
        }

        let county_fips = match county_fips {
            Some(code) if fips::is_state_code(&state) && fips::is_county_fips(&code) => code,
            _ => return Err(GeocodeError::MissingJurisdiction),
        };

        Ok(GeocodeResult {
            normalized_address: matched.matched_address.unwrap_or(normalized),
            lat: coords.y,
            lng: coords.x,
            state,
            county_fips,
            county_name,
        })
    }

    /// Secondary lookup. Any failure leaves the county unresolved.
    fn county_by_coordinates(&self, coords: Coordinates) -> Option<(String, Option<String>)> {
        let county = match census::county_at(&self.transport, &self.config, coords) {
            Ok(Some(county)) => county,
            Ok(None) => {
                tracing::warn!(x = coords.x, y = coords.y, "coordinate lookup found no county");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "coordinate lookup failed");
                return None;
            }
        };

        let code = county
            .geoid
            .as_ref()
            .and_then(census::code_text)
            .and_then(|raw| fips::county_from_geoid(&raw))?;
        Some((code, county.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::{StubReply, StubTransport};
    use serde_json::{json, Value};

    fn travis_match(county: Value) -> Value {
        json!({
            "result": {"addressMatches": [{
                "matchedAddress": "308 CHIPPENDALE AVE, AUSTIN, TX, 78745",
                "coordinates": {"x": -97.75, "y": 30.2},
                "addressComponents": {"state": "TX", "county": county, "countyName": "Travis"}
            }]}
        })
    }

    fn travis_geography() -> Value {
        json!({
            "result": {"geographies": {"Counties": [{"GEOID": "48453", "NAME": "Travis County"}]}}
        })
    }

    fn resolver(transport: StubTransport) -> GeocodeResolver<StubTransport> {
        GeocodeResolver::with_transport(transport, GeocoderConfig::default())
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("  308  Chippendale\tAve,\n Austin "), "308 Chippendale Ave, Austin");
        assert_eq!(normalize_address("   "), "");
    }

    #[test]
    fn test_resolve_primary_county() {
        let r = resolver(
            StubTransport::new().route("/onelineaddress", StubReply::Json(travis_match(json!("453")))),
        );
        let geo = r.resolve("308 Chippendale Ave, Austin, TX 78745").unwrap();
        assert_eq!(geo.state, "TX");
        assert_eq!(geo.county_fips, "453");
        assert_eq!(geo.county_name.as_deref(), Some("Travis"));
        assert_eq!(geo.normalized_address, "308 CHIPPENDALE AVE, AUSTIN, TX, 78745");
        assert!((geo.lat - 30.2).abs() < 1e-9);
        assert!((geo.lng + 97.75).abs() < 1e-9);
        assert_eq!(r.transport().calls().len(), 1);
    }

    #[test]
    fn test_resolve_sends_normalized_address() {
        let r = resolver(
            StubTransport::new().route("/onelineaddress", StubReply::Json(travis_match(json!("453")))),
        );
        r.resolve("  308   Chippendale Ave ").unwrap();
        assert!(r.transport().calls()[0].contains("address=308 Chippendale Ave&"));
    }

    #[test]
    fn test_resolve_geoid_in_primary() {
        let r = resolver(
            StubTransport::new().route("/onelineaddress", StubReply::Json(travis_match(json!("48453")))),
        );
        assert_eq!(r.resolve("x").unwrap().county_fips, "453");
    }

    #[test]
    fn test_resolve_numeric_unpadded_county() {
        let r = resolver(
            StubTransport::new().route("/onelineaddress", StubReply::Json(travis_match(json!(29)))),
        );
        assert_eq!(r.resolve("x").unwrap().county_fips, "029");
    }

    #[test]
    fn test_resolve_secondary_when_county_missing() {
        let body = json!({
            "result": {"addressMatches": [{
                "matchedAddress": "308 CHIPPENDALE AVE, AUSTIN, TX, 78745",
                "coordinates": {"x": -97.75, "y": 30.2},
                "addressComponents": {"state": "tx", "zip": "78745"}
            }]}
        });
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(body))
                .route("/coordinates", StubReply::Json(travis_geography())),
        );
        let geo = r.resolve("308 Chippendale Ave, Austin, TX 78745").unwrap();
        assert_eq!(geo.state, "TX");
        assert_eq!(geo.county_fips, "453");
        assert_eq!(geo.county_name.as_deref(), Some("Travis County"));

        let calls = r.transport().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].contains("x=-97.75&y=30.2"));
    }

    #[test]
    fn test_resolve_secondary_when_county_zero() {
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(travis_match(json!("000"))))
                .route("/coordinates", StubReply::Json(travis_geography())),
        );
        assert_eq!(r.resolve("x").unwrap().county_fips, "453");
        assert_eq!(r.transport().calls().len(), 2);
    }

    #[test]
    fn test_resolve_secondary_when_county_malformed() {
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(travis_match(json!("TRAVIS"))))
                .route("/coordinates", StubReply::Json(travis_geography())),
        );
        assert_eq!(r.resolve("x").unwrap().county_fips, "453");
    }

    #[test]
    fn test_resolve_secondary_failure_is_swallowed() {
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(travis_match(json!(""))))
                .route("/coordinates", StubReply::Status(500)),
        );
        assert_eq!(r.resolve("x").unwrap_err(), GeocodeError::MissingJurisdiction);
        assert_eq!(r.transport().calls().len(), 2);
    }

    #[test]
    fn test_resolve_secondary_unreachable_is_swallowed() {
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(travis_match(json!(""))))
                .route("/coordinates", StubReply::Unreachable),
        );
        assert_eq!(r.resolve("x").unwrap_err(), GeocodeError::MissingJurisdiction);
    }

    #[test]
    fn test_resolve_secondary_without_counties() {
        let r = resolver(
            StubTransport::new()
                .route("/onelineaddress", StubReply::Json(travis_match(json!(""))))
                .route("/coordinates", StubReply::Json(json!({"result": {"geographies": {}}}))),
        );
        assert_eq!(r.resolve("x").unwrap_err(), GeocodeError::MissingJurisdiction);
    }

    #[test]
    fn test_resolve_service_error() {
        let r = resolver(StubTransport::new().route("/onelineaddress", StubReply::Status(503)));
        let err = r.resolve("x").unwrap_err();
        assert_eq!(err, GeocodeError::Service { status: 503 });
        assert_eq!(err.to_string(), "Census geocoder failed: HTTP 503");
    }

    #[test]
    fn test_resolve_no_match() {
        let r = resolver(StubTransport::new().route(
            "/onelineaddress",
            StubReply::Json(json!({"result": {"addressMatches": []}})),
        ));
        assert_eq!(r.resolve("nowhere").unwrap_err(), GeocodeError::NoMatch);
        assert_eq!(r.transport().calls().len(), 1);
    }

    #[test]
    fn test_resolve_blank_makes_no_call() {
        let r = resolver(StubTransport::new());
        assert_eq!(r.resolve(" \t ").unwrap_err(), GeocodeError::NoMatch);
        assert!(r.transport().calls().is_empty());
    }

    #[test]
    fn test_resolve_bad_state() {
        let body = json!({
            "result": {"addressMatches": [{
                "coordinates": {"x": 1.0, "y": 2.0},
                "addressComponents": {"state": "Texas", "county": "453"}
            }]}
        });
        let r = resolver(StubTransport::new().route("/onelineaddress", StubReply::Json(body)));
        assert_eq!(r.resolve("x").unwrap_err(), GeocodeError::MissingJurisdiction);
        assert_eq!(r.transport().calls().len(), 1);
    }

    #[test]
    fn test_resolve_falls_back_to_input_address() {
        let body = json!({
            "result": {"addressMatches": [{
                "coordinates": {"x": -97.75, "y": 30.2},
                "addressComponents": {"state": "TX", "county": "453"}
            }]}
        });
        let r = resolver(StubTransport::new().route("/onelineaddress", StubReply::Json(body)));
        assert_eq!(r.resolve(" 1  Main St ").unwrap().normalized_address, "1 Main St");
    }

    #[test]
    fn test_resolve_network_error() {
        let r = resolver(StubTransport::new());
        let err = r.resolve("x").unwrap_err();
        assert!(matches!(err, GeocodeError::Network(_)));
        assert_eq!(err.kind(), "unknown");
    }
}
