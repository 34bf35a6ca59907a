use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    SlotUnavailable(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("transaction could not be processed")]
    TransactionError(#[source] sqlx::Error),
    #[error("database query failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("key-value store operation failed")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error(transparent)]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("unauthenticated")]
    UnauthenticatedError,
    #[error("operation not permitted")]
    UnauthorizedError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Caller-fault variants carry their reason to the client; the rest
        // stay generic and go to the log instead.
        match self {
            AppError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response()
            }
            AppError::EntityNotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::SlotUnavailable(msg) => (StatusCode::CONFLICT, msg).into_response(),
            AppError::ValidationError(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED.into_response(),
            AppError::UnauthorizedError => StatusCode::FORBIDDEN.into_response(),
            e => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
