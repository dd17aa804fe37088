use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::{ContextorError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("startup failed: {0}")]
    Startup(#[source] ContextorError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx, startup-only
            AppError::Startup(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Startup(_) => "STARTUP_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound => "NOT_FOUND",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status_code: status.as_u16(),
            error: self.error_code(),
            message: self.to_string(),
        };
        if status.is_server_error() {
            error!(status = status.as_u16(), code = body.error, "request failed: {}", body.message);
        } else {
            warn!(status = status.as_u16(), code = body.error, "request rejected: {}", body.message);
        }
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or mistyped JSON is a client error, whatever axum would pick.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

/// Maps pipeline failures to HTTP status & machine code.
impl From<ContextorError> for AppError {
    fn from(err: ContextorError) -> Self {
        let (status, code) = match err.kind() {
            ErrorKind::UnsupportedFileType => (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE"),
            ErrorKind::LoadFailure => (StatusCode::UNPROCESSABLE_ENTITY, "LOAD_FAILURE"),
            ErrorKind::IndexFailure => (StatusCode::SERVICE_UNAVAILABLE, "INDEX_FAILURE"),
            ErrorKind::CompletionFailure => (StatusCode::BAD_GATEWAY, "COMPLETION_FAILURE"),
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        AppError::Http {
            status,
            code,
            message: err.to_string(),
        }
    }
}
