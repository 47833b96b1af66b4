//! Core types for the jurisdiction registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which tier of the registry produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    Curated,
    StateFallback,
}

impl fmt::Display for LinkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curated => write!(f, "curated"),
            Self::StateFallback => write!(f, "state_fallback"),
        }
    }
}

/// A hand-verified county property-search page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    pub state: String,
    pub county_fips: String,
    pub county_name: String,
    pub property_search_url: String,
    /// Overrides the default "<County> County property search" label
    /// (parishes, boroughs, independent cities).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A state-wide page used when no county entry exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFallbackEntry {
    pub state: String,
    pub url: String,
    pub label: String,
}

/// On-disk layout of `registry.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFile {
    #[serde(default)]
    pub links: Vec<LinkEntry>,
    #[serde(default)]
    pub state_fallbacks: Vec<StateFallbackEntry>,
}

/// The answer to a registry lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub url: String,
    pub label: String,
    pub source: LinkSource,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county_name: Option<String>,
    pub state: String,
}

/// Entry counts, reported at startup and by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub curated: usize,
    pub state_fallbacks: usize,
}

/// Registry loading errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Cannot read registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed registry JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid registry entry #{index} ({what}): {reason}")]
    InvalidEntry {
        what: &'static str,
        index: usize,
        reason: String,
    },
}
