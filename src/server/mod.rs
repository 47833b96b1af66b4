mod handlers;
mod state;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::{GeocoderConfig, ServerConfig};
use crate::geocode::GeocodeResolver;
use crate::http::Transport;
use crate::registry::{Registry, RegistryError};

pub use handlers::HealthResponse;
pub use state::AppState;

pub fn build_router<T>(state: Arc<AppState<T>>) -> Router
where
    T: Transport + Send + Sync + 'static,
{
    Router::new()
        .route("/api/link", get(handlers::link::<T>))
        .route("/health", get(handlers::health::<T>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The configured registry file, or the built-in one.
pub fn load_registry(config: &ServerConfig) -> Result<Registry, RegistryError> {
    match &config.registry {
        Some(path) => Registry::load_from(path),
        None => Registry::builtin(),
    }
}

pub async fn start(config: ServerConfig, geocoder: GeocoderConfig) {
    let registry = load_registry(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "cannot load registry");
        std::process::exit(1);
    });
    let stats = registry.stats();
    let registry_source = match &config.registry {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    tracing::info!(
        curated = stats.curated,
        state_fallbacks = stats.state_fallbacks,
        source = %registry_source,
        "registry loaded"
    );

    let state = Arc::new(AppState {
        resolver: GeocodeResolver::new(geocoder),
        registry,
    });
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(%addr, error = %e, "cannot bind");
            std::process::exit(1);
        });

    tracing::info!("parcel-link server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "server error");
            std::process::exit(1);
        });
}
