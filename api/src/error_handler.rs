use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ai_llm_service::AiLlmError;
use docgen::DocgenError;
use rag_store::RagError;
use services::staging::StagingError;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn http(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        AppError::Http {
            status,
            code,
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::MissingEnv(_)
            | AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingEnv(_) => "MISSING_ENV",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        } else {
            warn!(code = self.error_code(), error = %self, "request rejected");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(e) => AppError::Config(e.to_string()),
            e @ (AiLlmError::ModelUnavailable { .. } | AiLlmError::Timeout(_)) => {
                AppError::http(StatusCode::BAD_GATEWAY, "MODEL_UNAVAILABLE", e.to_string())
            }
            e @ AiLlmError::ModelResponseMalformed(_) => {
                AppError::http(StatusCode::BAD_GATEWAY, "MODEL_RESPONSE_MALFORMED", e.to_string())
            }
            e => AppError::http(StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR", e.to_string()),
        }
    }
}

impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::ConfigMissing(var) => AppError::MissingEnv(var),
            RagError::Config(msg) => AppError::Config(msg),
            RagError::Embedding(e) => e.into(),
            e @ RagError::IndexUnavailable(_) => {
                AppError::http(StatusCode::BAD_GATEWAY, "INDEX_UNAVAILABLE", e.to_string())
            }
            e => AppError::http(StatusCode::INTERNAL_SERVER_ERROR, "INDEX_ERROR", e.to_string()),
        }
    }
}

impl From<DocgenError> for AppError {
    fn from(err: DocgenError) -> Self {
        match err {
            e @ DocgenError::Parse(_) => {
                AppError::http(StatusCode::UNPROCESSABLE_ENTITY, "PARSE_ERROR", e.to_string())
            }
            DocgenError::Rag(e) => e.into(),
            DocgenError::Llm(e) => e.into(),
            DocgenError::Config(msg) => AppError::Config(msg),
            DocgenError::Staging(StagingError::NotADirectory(p)) => {
                AppError::BadRequest(format!("not a directory: {}", p.display()))
            }
            DocgenError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                AppError::BadRequest(e.to_string())
            }
            e @ DocgenError::Cancelled => {
                AppError::http(StatusCode::SERVICE_UNAVAILABLE, "CANCELLED", e.to_string())
            }
            e => AppError::http(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().status_code()
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let parse = code_parse_error();
        assert_eq!(status_of(parse), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            status_of(RagError::ConfigMissing("QDRANT_API_KEY")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(RagError::IndexUnavailable("refused".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AiLlmError::ModelResponseMalformed("no `response`".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(DocgenError::Rag(RagError::Embedding(AiLlmError::ModelUnavailable {
                url: "http://localhost:11434/api/embed".into(),
                status: None,
                reason: "refused".into(),
            }))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(DocgenError::Cancelled), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_of(DocgenError::Io(std::io::Error::from(std::io::ErrorKind::NotFound))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_config_keeps_the_variable_name() {
        let err: AppError = RagError::ConfigMissing("QDRANT_URL").into();
        assert_eq!(err.error_code(), "MISSING_ENV");
        assert!(err.to_string().contains("QDRANT_URL"));
    }

    fn code_parse_error() -> DocgenError {
        DocgenError::Parse(code_indexer::Error::Parse {
            row: 0,
            column: 10,
            near: "(".into(),
        })
    }
}
