//! HTTP API gateway for the VynceAI browser extension.
//!
//! Everything the extension calls lives under `/api`: the assistant
//! endpoints (chat, query, models, summarize, analyze), service endpoints
//! (health, ping, config, status) and the browser command stub.
//!
//! Built on Axum. Request bodies are capped at 1 MB and CORS follows
//! `gateway.cors_origins`.

pub mod api;
pub mod commands;
pub mod error;
pub mod utils;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{Router, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use vynce_config::AppConfig;
use vynce_orchestrator::QueryOrchestrator;
use vynce_providers::ModelClient;

/// Maximum accepted request body.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared application state for the gateway.
pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: Arc<QueryOrchestrator>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, orchestrator: Arc<QueryOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
            start_time: chrono::Utc::now(),
        }
    }

    /// Build the Gemini-backed orchestrator from `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let client = Arc::new(ModelClient::from_config(&config));
        Self::new(config, Arc::new(QueryOrchestrator::new(client)))
    }

    pub fn uptime_secs(&self) -> u64 {
        chrono::Utc::now()
            .signed_duration_since(self.start_time)
            .num_seconds()
            .max(0) as u64
    }
}

/// Build the full router.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.gateway.cors_origins);

    let api = Router::new()
        .merge(api::api_router())
        .merge(utils::utils_router())
        .merge(commands::commands_router());

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// `*` anywhere in the list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> vynce_core::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(AppState::from_config(config));
    let app = build_router(state);

    info!(addr = %addr, "VynceAI gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

async fn root_handler() -> Json<RootResponse> {
    info!("Root endpoint accessed");
    Json(RootResponse {
        message: "VynceAI Backend running".into(),
        status: "active".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}
