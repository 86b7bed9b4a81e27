//! Assistant endpoints.
//!
//! - `POST /api/chat`       plain or enriched answer, full response record
//! - `GET  /api/models`     models the client may pick from
//! - `POST /api/query`      plain answer, `{response}` only
//! - `POST /api/summarize`  bullet summary of `context.pageContent`
//! - `POST /api/analyze`    quality/structure/tone/readability review

use axum::{
    Router,
    extract::State,
    extract::rejection::JsonRejection,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use vynce_core::provider::ModelDescriptor;
use vynce_core::query::{QueryRequest, QueryResponse};
use vynce_orchestrator::PageReport;

use crate::SharedState;
use crate::error::ApiError;

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/models", get(models_handler))
        .route("/query", post(query_handler))
        .route("/summarize", post(summarize_handler))
        .route("/analyze", post(analyze_handler))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelDescriptor>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlainQueryResponse {
    pub response: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    info!(
        prompt_chars = request.prompt.chars().count(),
        has_context = request.context.is_some(),
        "Chat request"
    );

    let response = state.orchestrator.process(&request).await?;
    Ok(Json(response))
}

async fn models_handler(State(state): State<SharedState>) -> Json<ModelListResponse> {
    let models = state.orchestrator.list_available_models().await;
    Json(ModelListResponse {
        count: models.len(),
        models,
    })
}

async fn query_handler(
    State(state): State<SharedState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<PlainQueryResponse>, ApiError> {
    let Json(request) = payload?;
    info!(prompt_chars = request.prompt.chars().count(), "Query request");

    let response = state.orchestrator.process_plain(&request).await?;
    Ok(Json(PlainQueryResponse {
        response: response.into_response(),
    }))
}

async fn summarize_handler(
    State(state): State<SharedState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<PageReport>, ApiError> {
    let Json(request) = payload?;
    info!("Summarize request");
    Ok(Json(state.orchestrator.summarize_page(&request).await?))
}

async fn analyze_handler(
    State(state): State<SharedState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<PageReport>, ApiError> {
    let Json(request) = payload?;
    info!("Analyze request");
    Ok(Json(state.orchestrator.analyze_page(&request).await?))
}
