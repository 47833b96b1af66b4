//! Live smoke check against a running server.

use crate::http::{Transport, TransportError};
use thiserror::Error;

pub const SMOKE_ADDRESS: &str = "308 Chippendale Ave, Austin, TX 78745";

/// Host the Travis County link must point at.
pub const EXPECTED_HOST: &str = "travis.prodigycad.com";

#[derive(Debug, Error, PartialEq)]
pub enum SmokeError {
    #[error("request failed: {0}")]
    Request(#[from] TransportError),

    #[error("expected a travis.prodigycad.com URL, got {0}")]
    WrongLink(String),
}

/// Ask the server at `base` for the sample address and check the answer.
/// Returns the URL on success.
pub fn run<T: Transport>(transport: &T, base: &str) -> Result<String, SmokeError> {
    let url = format!("{}/api/link", base.trim_end_matches('/'));
    let body = transport.get_json(&url, &[("address", SMOKE_ADDRESS)])?;

    match body.get("url").and_then(|u| u.as_str()) {
        Some(link) if link.contains(EXPECTED_HOST) => Ok(link.to_string()),
        _ => Err(SmokeError::WrongLink(body.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::{StubReply, StubTransport};
    use serde_json::json;

    #[test]
    fn test_smoke_ok() {
        let transport = StubTransport::new().route(
            "/api/link",
            StubReply::Json(json!({"url": "https://travis.prodigycad.com/property-search"})),
        );
        let link = run(&transport, "http://localhost:3000/").unwrap();
        assert!(link.contains(EXPECTED_HOST));
        assert_eq!(
            transport.calls(),
            vec![format!("http://localhost:3000/api/link?address={}", SMOKE_ADDRESS)]
        );
    }

    #[test]
    fn test_smoke_wrong_link() {
        let transport = StubTransport::new().route(
            "/api/link",
            StubReply::Json(json!({"url": null, "error": "No geocode match"})),
        );
        let err = run(&transport, "http://localhost:3000").unwrap_err();
        assert!(matches!(err, SmokeError::WrongLink(ref body) if body.contains("No geocode match")));
    }

    #[test]
    fn test_smoke_http_failure() {
        let transport = StubTransport::new().route("/api/link", StubReply::Status(500));
        assert_eq!(
            run(&transport, "http://localhost:3000").unwrap_err(),
            SmokeError::Request(TransportError::Status(500))
        );
    }
}
