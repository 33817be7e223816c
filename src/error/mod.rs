//! Application error types and their conversion to HTTP responses.
//!
//! Every failure raised by a validation rule, guard or handler ends up here.
//! [`AppError::Status`] carries an explicit status and user-facing message and
//! is passed through verbatim; [`AppError::Validation`] is the aggregated 422
//! outcome of a schema; every other variant is unexpected and becomes a 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::messages::users::VALIDATION_ERROR;

/// A known, user-facing failure with its HTTP status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StatusError {
    pub message: String,
    pub status: StatusCode,
}

impl StatusError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered field failures gathered across every rule of one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Status(#[from] StatusError),

    #[error("Validation error")]
    Validation(ValidationErrors),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Status(StatusError::unauthorized(message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Status(StatusError::forbidden(message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status(StatusError::not_found(message))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Status(StatusError::bad_request(message))
    }

    /// HTTP status this error converts to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Status(e) => e.status,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Status(e) => json!({ "message": e.message }),
            AppError::Validation(errors) => json!({
                "message": VALIDATION_ERROR,
                "errors": errors,
            }),
            other => {
                error!(error = %other, "unexpected error");
                json!({ "message": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
