//! Address to property-search link: the one operation behind `/api/link`.
//!
//! Never fails. Every error becomes the `error` field with `url: null`.

use crate::geocode::{GeocodeError, GeocodeResolver};
use crate::http::Transport;
use crate::registry::{LinkSource, Registry};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the caller as text.
#[derive(Debug, Error, PartialEq)]
pub enum LinkError {
    #[error("Missing address")]
    MissingAddress,

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("No link for this county yet")]
    NoLink,

    #[error("Unknown error")]
    Unknown,
}

impl LinkError {
    /// Stable tag for logs and error taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingAddress => "missing_address",
            Self::Geocode(e) => e.kind(),
            Self::NoLink => "no_link",
            Self::Unknown => "unknown",
        }
    }
}

/// JSON body of `/api/link`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub url: Option<String>,
    pub normalized_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LinkSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// `LinkError::kind()` of `error`; logged, never serialized.
    #[serde(skip)]
    pub error_kind: Option<&'static str>,
}

impl LinkResponse {
    /// A failure with nothing resolved.
    pub fn failure(err: &LinkError) -> Self {
        Self {
            url: None,
            normalized_address: String::new(),
            county_name: None,
            state: None,
            source: None,
            label: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }

    /// Stable outcome tag for request logs: the link source on a hit,
    /// the error kind otherwise.
    pub fn outcome(&self) -> String {
        match (&self.source, self.error_kind) {
            (Some(source), _) => source.to_string(),
            (None, Some(kind)) => kind.to_string(),
            (None, None) => LinkError::Unknown.kind().to_string(),
        }
    }
}

/// Geocode an address and look up its property-search link.
pub fn resolve_link<T: Transport>(
    resolver: &GeocodeResolver<T>,
    registry: &Registry,
    address: &str,
) -> LinkResponse {
    let address = address.trim();
    if address.is_empty() {
        return LinkResponse::failure(&LinkError::MissingAddress);
    }

    let geo = match resolver.resolve(address) {
        Ok(geo) => geo,
        Err(e) => {
            let err = LinkError::from(e);
            tracing::info!(kind = err.kind(), error = %err, "geocode failed");
            return LinkResponse::failure(&err);
        }
    };

    match registry.lookup(&geo.state, &geo.county_fips) {
        Some(entry) => LinkResponse {
            url: Some(entry.url),
            normalized_address: geo.normalized_address,
            county_name: entry.county_name.or(geo.county_name),
            state: Some(entry.state),
            source: Some(entry.source),
            label: Some(entry.label),
            error: None,
            error_kind: None,
        },
        None => {
            tracing::info!(state = %geo.state, county = %geo.county_fips, "no registry entry");
            LinkResponse {
                url: None,
                normalized_address: geo.normalized_address,
                county_name: geo.county_name,
                state: Some(geo.state),
                source: None,
                label: None,
                error: Some(LinkError::NoLink.to_string()),
                error_kind: Some(LinkError::NoLink.kind()),
            }
        }
    }
}
