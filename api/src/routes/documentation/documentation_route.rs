//! POST /documentation: documents every method of one Java file.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::Response};
use docgen::{ReportDeps, generate_documentation_file, reporter};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::documentation::documentation_request::{DocumentationRequest, DocumentationResponse},
};

/// Handler: POST /documentation
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/documentation \
///   -H 'content-type: application/json' \
///   -d '{"file_path":"/work/shop/src/Order.java","workspace_root":"/work/shop"}'
/// ```
pub async fn documentation_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DocumentationRequest>,
) -> AppResult<Response> {
    let file = PathBuf::from(body.file_path.trim());
    if file.extension().and_then(|e| e.to_str()) != Some("java") {
        return Err(AppError::BadRequest("file_path must point to a .java file".into()));
    }
    if !file.is_file() {
        return Err(AppError::BadRequest(format!("file not found: {}", file.display())));
    }

    let workspace_root = body
        .workspace_root
        .map(|r| PathBuf::from(r.trim()))
        .filter(|r| !r.as_os_str().is_empty());
    if let Some(root) = &workspace_root {
        if !root.is_dir() {
            return Err(AppError::BadRequest(format!("workspace_root is not a directory: {}", root.display())));
        }
    }

    let store = state.rag_store()?;
    let deps = ReportDeps {
        index: &store,
        generator: state.generator.as_ref(),
        model: state.model(),
    };
    let cancel = state.shutdown.child_token();
    let progress = reporter(state.interactive);

    let doc = generate_documentation_file(
        &file,
        workspace_root.as_deref(),
        deps,
        &state.docgen,
        progress.as_ref(),
        &cancel,
    )
    .await?;

    info!(path = %doc.output_path.display(), sections = doc.sections, "documentation file generated");

    Ok(ApiResponse::success(DocumentationResponse {
        output_path: doc.output_path.display().to_string(),
        sections: doc.sections,
    })
    .into_response_with_status(StatusCode::OK))
}
