use std::{path::PathBuf, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::Response};
use docgen::{DocgenError, index_project_dir, reporter};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::index_project::index_project_request::{IndexProjectRequest, IndexProjectResponse},
};

/// Handler: POST /index_project
///
/// Indexes a staged copy of `project_dir`. Shutdown drops the run, and with
/// it the staging copy.
pub async fn index_project_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IndexProjectRequest>,
) -> AppResult<Response> {
    let dir = PathBuf::from(body.project_dir.trim());
    if dir.as_os_str().is_empty() || !dir.is_dir() {
        return Err(AppError::BadRequest(format!("project_dir is not a directory: {}", dir.display())));
    }

    let store = state.rag_store()?;
    let chunking = store.config().chunking;
    let cancel = state.shutdown.child_token();
    let progress = reporter(state.interactive);

    let report = tokio::select! {
        _ = cancel.cancelled() => Err(DocgenError::Cancelled),
        r = index_project_dir(&dir, &store, &chunking, progress.as_ref()) => r,
    }?;

    info!(dir = %dir.display(), ?report, "project indexed");

    Ok(ApiResponse::success(IndexProjectResponse {
        files: report.files,
        chunks: report.chunks,
        upserted: report.upserted,
    })
    .into_response_with_status(StatusCode::OK))
}
