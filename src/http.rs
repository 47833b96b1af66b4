//! Blocking JSON-over-HTTP client used for every outbound call.
//!
//! `Transport` is the seam between the geocoder and the network; the
//! production implementation is a shared `ureq::Agent`.

use crate::config::USER_AGENT;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Outbound call failures, before they are given domain meaning.
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid JSON body: {0}")]
    Decode(String),
}

/// GET a URL with query parameters and decode the JSON body.
///
/// Non-2xx responses are `TransportError::Status`.
pub trait Transport {
    fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, TransportError>;
}

/// `ureq`-backed transport. Cheap to clone; clones share a connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => return Err(TransportError::Status(status)),
            Err(e) => return Err(TransportError::Network(e.to_string())),
        };

        response
            .into_json()
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
