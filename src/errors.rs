use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::engine::EvalError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, retryable) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), false),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), false),
            AppError::PreconditionFailed(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone(), false)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), true),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into(), false),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into(), false)
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
                retryable,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

/// Map the engine taxonomy onto HTTP statuses. Precondition failures are
/// 422 (the admin can fix the league or record the result); serialization
/// conflicts are 409 and marked retryable.
impl From<EvalError> for AppError {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::EventNotFound { .. } | EvalError::PredictionNotFound { .. } => {
                AppError::NotFound(e.to_string())
            }
            EvalError::OutcomeNotRecorded { .. } | EvalError::NoEvaluatorsConfigured { .. } => {
                AppError::PreconditionFailed(e.to_string())
            }
            EvalError::TransactionConflict(_) => AppError::Conflict(e.to_string()),
            EvalError::Persistence(source) => AppError::Internal(source.into()),
        }
    }
}
