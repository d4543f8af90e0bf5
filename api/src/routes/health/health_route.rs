use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// Handler: GET /health
///
/// 200 when Ollama answers and has the generation model, 503 otherwise.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let cfg = state.generator.config().with_model(state.model());
    let status = state.health.check(&cfg).await;

    let code = if status.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    ApiResponse::success(status).into_response_with_status(code)
}
