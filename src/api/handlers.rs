//! HTTP request handlers for the bridge API.
//!
//! Each handler resolves the request correlation id once, hands it
//! explicitly to the translator and gateway, and on failure logs twice
//! (warn with the raw error, error with the formatted message) before
//! answering with the generic failure status.

use crate::api::models::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    ModelList,
};
use crate::api::upstream::OllamaGateway;
use crate::core::config::OwnershipTable;
use crate::core::error::{BridgeError, Result};
use crate::core::logging::{correlation_id, log_failure};
use crate::translator;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Shared application state.
///
/// Read-only after startup; nothing here is mutated across requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: OllamaGateway,
    pub ownership: OwnershipTable,
}

impl AppState {
    pub fn new(gateway: OllamaGateway, ownership: OwnershipTable) -> Self {
        Self { gateway, ownership }
    }
}

/// Build the router with all bridge endpoints.
///
/// Method fallbacks route to the same 404 handler as unknown paths: a
/// wrong method on a known path is indistinguishable from an unknown
/// route, matching the catch-all contract of the original bridge.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/models", get(list_models).fallback(not_found))
        .route(
            "/v1/chat/completions",
            post(chat_completions).fallback(not_found),
        )
        .route("/v1/completions", post(completions).fallback(not_found))
        .route(
            "/v1/engines/:engine/completions",
            post(engine_completions).fallback(not_found),
        )
        .route("/v1/generate", post(generate).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// List available models.
pub async fn list_models(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let request_id = correlation_id(&headers);
    tracing::info!(request_id = %request_id, "Request received");

    match list_models_inner(&state, &request_id).await {
        Ok(list) => Json(list).into_response(),
        Err(err) => {
            log_failure(&request_id, &err);
            err.into_response()
        }
    }
}

async fn list_models_inner(state: &AppState, request_id: &str) -> Result<ModelList> {
    let raw = state.gateway.list_tags(request_id).await?;
    let tags = serde_json::from_value(raw)?;
    Ok(translator::map_model_list(tags, &state.ownership))
}

/// Handle chat completion requests.
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChatCompletionRequest>,
) -> Response {
    let request_id = correlation_id(&headers);
    tracing::info!(request_id = %request_id, model = ?payload.model, "Request received");

    match chat_inner(&state, &request_id, &payload, None).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log_failure(&request_id, &err);
            err.into_response()
        }
    }
}

async fn chat_inner(
    state: &AppState,
    request_id: &str,
    payload: &ChatCompletionRequest,
    forced_model: Option<&str>,
) -> Result<ChatCompletionResponse> {
    let body = translator::build_chat_body(payload, forced_model)?;
    let raw = state.gateway.chat(&body, request_id).await?;
    translator::map_chat_response(request_id, raw)
}

/// Handle text completion requests via the fill-in-the-middle simulation.
pub async fn completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CompletionRequest>,
) -> Response {
    let request_id = correlation_id(&headers);
    tracing::info!(request_id = %request_id, model = ?payload.model, "Request received");

    match infill_inner(&state, &request_id, &payload, None).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log_failure(&request_id, &err);
            err.into_response()
        }
    }
}

/// Same as [`completions`] but the `engine` path segment forces the model.
pub async fn engine_completions(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<CompletionRequest>,
) -> Response {
    let request_id = correlation_id(&headers);
    tracing::info!(request_id = %request_id, engine = %engine, "Request received");

    match infill_inner(&state, &request_id, &payload, Some(&engine)).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log_failure(&request_id, &err);
            err.into_response()
        }
    }
}

async fn infill_inner(
    state: &AppState,
    request_id: &str,
    payload: &CompletionRequest,
    forced_model: Option<&str>,
) -> Result<CompletionResponse> {
    // Rejects requests without a stop sequence before anything goes out
    let body = translator::build_infill_body(payload, forced_model)?;
    let stop_tail = payload.stop.first().ok_or(BridgeError::MissingStop)?;

    let raw = state.gateway.chat(&body, request_id).await?;
    translator::map_infill_response(request_id, stop_tail, raw)
}

/// Handle direct text generation requests, passed through to the raw
/// generate endpoint.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let request_id = correlation_id(&headers);
    tracing::info!(request_id = %request_id, "Request received");

    match generate_inner(&state, &request_id, &payload).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log_failure(&request_id, &err);
            err.into_response()
        }
    }
}

async fn generate_inner(
    state: &AppState,
    request_id: &str,
    payload: &Value,
) -> Result<CompletionResponse> {
    let body = translator::build_generate_body(payload, None);
    let raw = state.gateway.generate(&body, request_id).await?;
    translator::map_generate_response(request_id, raw)
}

/// Fallback for unmatched routes.
async fn not_found(uri: Uri) -> StatusCode {
    tracing::warn!("404 - Not Found: {}", uri);
    StatusCode::NOT_FOUND
}
