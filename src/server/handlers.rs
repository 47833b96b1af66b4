use axum::extract::{Query, State};
use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::http::Transport;
use crate::link::{resolve_link, LinkError, LinkResponse};
use crate::registry::RegistryStats;

use super::state::AppState;

// ─── GET /api/link ───────────────────────────────────────────────

/// First `address` value in the query string. Repeated keys are allowed.
fn first_address(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "address")
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Always 200; failures travel in the `error` field.
pub async fn link<T>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<LinkResponse>
where
    T: Transport + Send + Sync + 'static,
{
    let start = Instant::now();
    let address = first_address(params);

    if address.is_empty() {
        tracing::info!(kind = LinkError::MissingAddress.kind(), "GET /api/link");
        return Json(LinkResponse::failure(&LinkError::MissingAddress));
    }

    // Geocoder calls block; keep them off the async workers.
    let worker = Arc::clone(&state);
    let query = address.clone();
    let response = tokio::task::spawn_blocking(move || {
        resolve_link(&worker.resolver, &worker.registry, &query)
    })
    .await
    .unwrap_or_else(|e| {
        tracing::error!(error = %e, "link worker failed");
        LinkResponse::failure(&LinkError::Unknown)
    });

    tracing::info!(
        address = %address,
        outcome = %response.outcome(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "GET /api/link"
    );

    Json(response)
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub registry: RegistryStats,
}

pub async fn health<T>(State(state): State<Arc<AppState<T>>>) -> Json<HealthResponse>
where
    T: Transport + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "ok",
        registry: state.registry.stats(),
    })
}
