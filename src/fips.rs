//! FIPS code normalization shared by the geocoder and the registry.
//!
//! State codes are two-letter postal abbreviations (the Census geocoder
//! reports `state` that way). County codes are the three-digit county part
//! of a five-digit GEOID.

/// `true` for exactly two ASCII letters.
pub fn is_state_code(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// `true` for exactly three ASCII digits.
pub fn is_county_fips(s: &str) -> bool {
    s.len() == 3 && s.chars().all(|c| c.is_ascii_digit())
}

/// Trim and left-pad a county code with zeros to three characters.
/// Longer input is returned trimmed but otherwise untouched.
pub fn pad_county(s: &str) -> String {
    format!("{:0>3}", s.trim())
}

/// Registry key: `STATE:FIPS`, upper-cased and padded.
pub fn jurisdiction_key(state: &str, county_fips: &str) -> String {
    format!("{}:{}", state.trim().to_uppercase(), pad_county(county_fips))
}

/// Normalize the `county` component of an address match.
///
/// Accepts a bare county code ("53", "453") or a full GEOID ("48453").
/// Returns `None` when the value is empty, non-numeric, `000`, or any other
/// length, which is the signal to fall back to a coordinate lookup.
pub fn county_from_component(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let county = match raw.len() {
        5 => raw[2..].to_string(),
        1..=3 => pad_county(raw),
        _ => return None,
    };
    if county == "000" {
        return None;
    }
    Some(county)
}

/// Extract the county part of a county GEOID ("48453" -> "453").
/// Short GEOIDs are zero-padded to five digits first.
pub fn county_from_geoid(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > 5 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let geoid = format!("{:0>5}", raw);
    Some(geoid[2..].to_string())
}
