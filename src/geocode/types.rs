//! Core types for the geocode subsystem.

use crate::http::TransportError;
use serde::Serialize;
use thiserror::Error;

/// An address resolved to its state and county.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    /// The geocoder's canonical form of the address (e.g. "308 CHIPPENDALE AVE, AUSTIN, TX, 78745")
    pub normalized_address: String,
    pub lat: f64,
    pub lng: f64,
    /// Two-letter postal code, upper case
    pub state: String,
    /// Three-digit county FIPS
    pub county_fips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county_name: Option<String>,
}

/// Geocode resolution errors.
#[derive(Debug, Error, PartialEq)]
pub enum GeocodeError {
    #[error("Census geocoder failed: HTTP {status}")]
    Service { status: u16 },

    #[error("No geocode match")]
    NoMatch,

    #[error("Missing state/county FIPS in geocoder response")]
    MissingJurisdiction,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
}

impl GeocodeError {
    /// Stable tag for logs and error taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Service { .. } => "geocode_service",
            Self::NoMatch => "no_match",
            Self::MissingJurisdiction => "missing_jurisdiction",
            Self::Network(_) | Self::InvalidResponse(_) => "unknown",
        }
    }
}

impl From<TransportError> for GeocodeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => Self::Service { status },
            TransportError::Network(msg) => Self::Network(msg),
            TransportError::Decode(msg) => Self::InvalidResponse(msg),
        }
    }
}
