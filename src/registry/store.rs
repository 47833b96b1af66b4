//! The load-once jurisdiction registry.
//!
//! Tier 1: curated county entry keyed by `STATE:FIPS`.
//! Tier 2: state fallback keyed by state code.
//! Built once at startup and shared read-only across requests.

use super::types::{
    LinkEntry, LinkSource, LookupResult, RegistryError, RegistryFile, RegistryStats,
    StateFallbackEntry,
};
use crate::fips;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_REGISTRY: &str = include_str!("../../data/registry.json");

/// The jurisdiction-to-URL registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    curated: HashMap<String, LinkEntry>,
    fallbacks: HashMap<String, StateFallbackEntry>,
}

impl Registry {
    /// The registry compiled into the binary.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY)
    }

    /// Load a registry file from disk.
    pub fn load_from(path: &Path) -> Result<Self, RegistryError> {
        let data = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(data)?;
        Self::from_entries(file.links, file.state_fallbacks)
    }

    /// Build from in-memory entries. Any invalid entry rejects the whole set.
    /// On duplicate keys the later entry wins.
    pub fn from_entries(
        links: Vec<LinkEntry>,
        fallbacks: Vec<StateFallbackEntry>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();

        for (index, mut entry) in links.into_iter().enumerate() {
            let invalid = |reason: String| RegistryError::InvalidEntry {
                what: "link",
                index,
                reason,
            };
            entry.state = entry.state.trim().to_uppercase();
            entry.county_fips = fips::pad_county(&entry.county_fips);
            if !fips::is_state_code(&entry.state) {
                return Err(invalid(format!("bad state code '{}'", entry.state)));
            }
            if !fips::is_county_fips(&entry.county_fips) {
                return Err(invalid(format!("bad county FIPS '{}'", entry.county_fips)));
            }
            if entry.property_search_url.trim().is_empty() {
                return Err(invalid("empty propertySearchUrl".into()));
            }

            let key = fips::jurisdiction_key(&entry.state, &entry.county_fips);
            if registry.curated.contains_key(&key) {
                tracing::warn!(%key, "duplicate curated entry, keeping the later one");
            }
            registry.curated.insert(key, entry);
        }

        for (index, mut entry) in fallbacks.into_iter().enumerate() {
            entry.state = entry.state.trim().to_uppercase();
            if !fips::is_state_code(&entry.state) {
                return Err(RegistryError::InvalidEntry {
                    what: "state fallback",
                    index,
                    reason: format!("bad state code '{}'", entry.state),
                });
            }
            if entry.url.trim().is_empty() {
                return Err(RegistryError::InvalidEntry {
                    what: "state fallback",
                    index,
                    reason: "empty url".into(),
                });
            }
            if registry.fallbacks.contains_key(&entry.state) {
                tracing::warn!(state = %entry.state, "duplicate state fallback, keeping the later one");
            }
            registry.fallbacks.insert(entry.state.clone(), entry);
        }

        Ok(registry)
    }

    /// Two-tier lookup: curated county entry, else state fallback, else `None`.
    ///
    /// `state` is case-insensitive; `county_fips` may be unpadded ("53" == "053").
    pub fn lookup(&self, state: &str, county_fips: &str) -> Option<LookupResult> {
        let key = fips::jurisdiction_key(state, county_fips);
        if let Some(curated) = self.curated.get(&key) {
            let label = curated
                .label
                .clone()
                .unwrap_or_else(|| format!("{} County property search", curated.county_name));
            return Some(LookupResult {
                url: curated.property_search_url.clone(),
                label,
                source: LinkSource::Curated,
                verified: true,
                county_name: Some(curated.county_name.clone()),
                state: curated.state.clone(),
            });
        }

        let fallback = self.fallbacks.get(&state.trim().to_uppercase())?;
        Some(LookupResult {
            url: fallback.url.clone(),
            label: fallback.label.clone(),
            source: LinkSource::StateFallback,
            verified: true,
            county_name: None,
            state: fallback.state.clone(),
        })
    }

    /// URL only.
    pub fn link(&self, state: &str, county_fips: &str) -> Option<String> {
        self.lookup(state, county_fips).map(|r| r.url)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            curated: self.curated.len(),
            state_fallbacks: self.fallbacks.len(),
        }
    }

    /// All curated entries, in no particular order.
    #[cfg(test)]
    pub fn curated_entries(&self) -> impl Iterator<Item = &LinkEntry> {
        self.curated.values()
    }

    #[cfg(test)]
    pub fn has_state_fallback(&self, state: &str) -> bool {
        self.fallbacks.contains_key(&state.trim().to_uppercase())
    }
}
