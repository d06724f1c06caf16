//! Store and API error types.
//!
//! Stores report `StoreError`; actions report `ApiError`, which knows how to
//! render itself as an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::auth::AuthError;
use super::validation::ValidationErrors;

/// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

// =============================================================================
// StoreError
// =============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflicting record: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Store error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::Conflict(
                    db.constraint()
                        .map(str::to_string)
                        .unwrap_or_else(|| db.message().to_string()),
                )
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// ApiError
// =============================================================================

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The given data was invalid.")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("The record was saved but a follow-up step failed: {0}")]
    HookFailure(anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Auth(err) if err.is_unauthenticated() => "unauthenticated",
            ApiError::Auth(_) => "authorization",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::HookFailure(_) => "hook_failure",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(err) if err.is_unauthenticated() => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::HookFailure(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationErrors::single(field, message))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Record"),
            StoreError::Conflict(detail) => {
                ApiError::Conflict(format!("A conflicting record already exists ({detail})"))
            }
            StoreError::Database(err) => ApiError::Internal(err.into()),
            StoreError::Other(err) => ApiError::Internal(err),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let body = match self {
            ApiError::Validation(errors) => ErrorBody {
                kind,
                message: "The given data was invalid.".to_string(),
                errors: Some(errors),
            },
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                ErrorBody {
                    kind,
                    message: "Something went wrong.".to_string(),
                    errors: None,
                }
            }
            ApiError::HookFailure(err) => {
                tracing::error!(error = %err, "Lifecycle hook failed");
                ErrorBody {
                    kind,
                    message: "The record was saved but a follow-up step failed.".to_string(),
                    errors: None,
                }
            }
            other => ErrorBody {
                kind,
                message: other.to_string(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
