use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    documentation::documentation_route::documentation_route, health::health_route::health_route,
    index_project::index_project_route::index_project_route,
};

const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";

/// Builds the state from env, binds `API_ADDRESS` and serves until Ctrl+C / SIGTERM.
///
/// The shutdown signal also cancels every report or indexing run still in flight.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let shutdown = CancellationToken::new();
    let state = Arc::new(AppState::from_env(shutdown.clone())?);
    let app = router(state);

    let listener = TcpListener::bind(&host_url).await.map_err(AppError::Bind)?;
    info!(address = %host_url, "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(AppError::Server)?;

    info!("api stopped");
    Ok(())
}

/// All routes over a shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/documentation", post(documentation_route))
        .route("/index_project", post(index_project_route))
        .route("/health", get(health_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM, then cancels `token`.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received; cancelling running jobs");
    token.cancel();
}
