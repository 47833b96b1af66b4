//! US Census geocoder endpoints: one-line address lookup and
//! coordinate-to-geography lookup.

use super::types::GeocodeError;
use crate::config::GeocoderConfig;
use crate::http::Transport;
use serde::Deserialize;
use serde_json::Value;

// ─── Address lookup ─────────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
struct AddressLookupResponse {
    #[serde(default)]
    result: Option<AddressLookupResult>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct AddressLookupResult {
    #[serde(default)]
    address_matches: Option<Vec<AddressMatch>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressMatch {
    #[serde(default)]
    pub matched_address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub address_components: Option<AddressComponents>,
}

/// x is longitude, y is latitude.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinates {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
    #[serde(default)]
    pub state: Option<String>,
    /// String or number depending on benchmark
    #[serde(default)]
    pub county: Option<Value>,
    #[serde(default)]
    pub county_name: Option<String>,
}

/// Look up a one-line address. `Ok(None)` when the geocoder found no match.
pub fn find_address<T: Transport>(
    transport: &T,
    config: &GeocoderConfig,
    address: &str,
) -> Result<Option<AddressMatch>, GeocodeError> {
    let body = transport.get_json(
        &config.address_url(),
        &[
            ("address", address),
            ("benchmark", config.benchmark.as_str()),
            ("format", "json"),
        ],
    )?;

    let parsed: AddressLookupResponse =
        serde_json::from_value(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .result
        .and_then(|r| r.address_matches)
        .and_then(|matches| matches.into_iter().next()))
}

// ─── Coordinate lookup ──────────────────────────────────────────

#[derive(Deserialize, Debug, Default)]
struct GeographyResponse {
    #[serde(default)]
    result: Option<GeographyResult>,
}

#[derive(Deserialize, Debug, Default)]
struct GeographyResult {
    #[serde(default)]
    geographies: Option<Geographies>,
}

#[derive(Deserialize, Debug, Default)]
struct Geographies {
    #[serde(default, rename = "Counties")]
    counties: Option<Vec<CountyGeography>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CountyGeography {
    #[serde(default, rename = "GEOID")]
    pub geoid: Option<Value>,
    #[serde(default, rename = "NAME")]
    pub name: Option<String>,
}

/// Find the county containing a point. `Ok(None)` when the point is outside
/// every county.
pub fn county_at<T: Transport>(
    transport: &T,
    config: &GeocoderConfig,
    coords: Coordinates,
) -> Result<Option<CountyGeography>, GeocodeError> {
    let x = coords.x.to_string();
    let y = coords.y.to_string();
    let body = transport.get_json(
        &config.coordinates_url(),
        &[
            ("x", x.as_str()),
            ("y", y.as_str()),
            ("benchmark", config.benchmark.as_str()),
            ("vintage", config.vintage.as_str()),
            ("format", "json"),
        ],
    )?;

    let parsed: GeographyResponse =
        serde_json::from_value(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .result
        .and_then(|r| r.geographies)
        .and_then(|g| g.counties)
        .and_then(|counties| counties.into_iter().next()))
}

/// Render a string-or-number JSON code as text.
pub fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
