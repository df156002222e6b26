use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codesense_core::error::CoreError;
use codesense_core::normalize::NormalizationError;
use codesense_gemini::UpstreamError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, upstream, and database error types and implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON
/// responses. Nothing here leaks internals in a 5xx body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `codesense_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the upstream model service.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The upstream model's payload could not be normalized.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                // Non-owner access answers 401, not the standard 403: the
                // shipped web client treats this status as "sign in again"
                // and depends on it. The distinct code keeps the cases
                // tellable apart.
                CoreError::Forbidden(msg) => {
                    (StatusCode::UNAUTHORIZED, "FORBIDDEN", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Upstream model failures ---
            AppError::Upstream(upstream) => match upstream {
                UpstreamError::RateLimited(_) => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "UPSTREAM_RATE_LIMITED",
                    "The analysis service is rate limited; try again shortly".to_string(),
                ),
                UpstreamError::Overloaded(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_OVERLOADED",
                    "The analysis service is temporarily overloaded".to_string(),
                ),
                UpstreamError::Timeout
                | UpstreamError::Transport(_)
                | UpstreamError::Unknown { .. } => {
                    tracing::error!(error = %upstream, "Upstream analysis failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_ERROR",
                        "Code analysis failed".to_string(),
                    )
                }
            },

            // --- Unparseable upstream payload ---
            AppError::Normalization(err) => {
                tracing::error!(error = %err, "Upstream payload failed normalization");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_ANALYSIS",
                    "The analysis service returned an unreadable result".to_string(),
                )
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 with a sanitized
/// message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
