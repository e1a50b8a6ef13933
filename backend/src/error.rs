//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting engine and storage errors to HTTP responses.
//! Storage failures are logged in full and reported without detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use liftwise_shared::validation::ValidationError;
use liftwise_shared::{
    ErrorDetail, ErrorResponse, PlanError, StoreError, ONBOARDING_REQUIRED_MESSAGE,
    SETTINGS_REQUIRED_MESSAGE,
};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {}", .0.user_message())]
    InvalidField(ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{}", ONBOARDING_REQUIRED_MESSAGE)]
    OnboardingRequired,

    #[error("{}", SETTINGS_REQUIRED_MESSAGE)]
    SettingsRequired,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::MissingProfile => ApiError::OnboardingRequired,
            PlanError::MissingSettings => ApiError::SettingsRequired,
            PlanError::InvalidSettings(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidField(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first offending field; clients fix one at a time.
        let first = errors
            .field_errors()
            .into_iter()
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is out of range".to_string());
                ValidationError::new(&field, &message)
            });

        match first {
            Some(err) => ApiError::InvalidField(err),
            None => ApiError::Validation(errors.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            ApiError::InvalidField(err) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.user_message(),
                Some(err.field.clone()),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            ApiError::OnboardingRequired => (
                StatusCode::CONFLICT,
                "ONBOARDING_REQUIRED",
                ONBOARDING_REQUIRED_MESSAGE.to_string(),
                None,
            ),
            ApiError::SettingsRequired => (
                StatusCode::CONFLICT,
                "SETTINGS_REQUIRED",
                SETTINGS_REQUIRED_MESSAGE.to_string(),
                None,
            ),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            ApiError::Storage(err) => {
                error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                    None,
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}
