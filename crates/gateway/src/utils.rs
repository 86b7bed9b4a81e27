//! Service endpoints: health, ping, config and status.

use axum::{Router, extract::State, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vynce_config::ApiKeysStatus;

use crate::SharedState;

const SERVICE_NAME: &str = "VynceAI";

pub fn utils_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .route("/config", get(config_handler))
        .route("/status", get(status_handler))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub uptime: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub ping: String,
    pub timestamp: i64,
}

/// Non-sensitive configuration. Never carries the key itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub app_name: String,
    pub version: String,
    pub debug: bool,
    pub api_keys_configured: ApiKeysStatus,
    pub available_models: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub service: String,
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub api_providers: ApiKeysStatus,
    pub available_models: Vec<String>,
    pub total_models: usize,
}

/// Render an uptime as `1h 2m`, `3m 4s` or `5s`.
pub fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    debug!("Health check request");
    Json(HealthResponse {
        status: "ok".into(),
        service: SERVICE_NAME.into(),
        uptime: format_uptime(state.uptime_secs()),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        ping: "pong".into(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

async fn config_handler(State(state): State<SharedState>) -> Json<ConfigResponse> {
    debug!("Config request");
    let models = state.orchestrator.list_available_models().await;

    Json(ConfigResponse {
        app_name: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").into(),
        debug: state.config.debug,
        api_keys_configured: state.config.api_keys_status(),
        available_models: models.len(),
        max_tokens: state.config.default_max_tokens,
        temperature: state.config.default_temperature,
    })
}

async fn status_handler(State(state): State<SharedState>) -> Json<StatusResponse> {
    debug!("Status request");
    let models = state.orchestrator.list_available_models().await;

    Json(StatusResponse {
        service: format!("{SERVICE_NAME} Backend"),
        status: "running".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.uptime_secs(),
        api_providers: state.config.api_keys_status(),
        total_models: models.len(),
        available_models: models.into_iter().map(|m| m.id).collect(),
    })
}
