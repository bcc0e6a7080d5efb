use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every fault the caller cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream call failed. The first field is what the caller sees,
    /// the second is logged.
    #[error("Upstream error: {1}")]
    Upstream(String, anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    /// Missing or invalid configuration. The first field is what the caller
    /// sees, the second is logged.
    #[error("Configuration error: {1}")]
    ConfigError(String, anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(
            "Server configuration error.".to_string(),
            anyhow::Error::new(err),
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(..) | AppError::InternalError(_) | AppError::ConfigError(..) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Flattens validator output into the first message found, falling back to
/// the offending field's name.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    for (field, errs) in errors.field_errors() {
        if let Some(err) = errs.first() {
            return match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}.", field),
            };
        }
    }

    "Invalid request.".to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            AppError::ValidationError(errors) => first_validation_message(&errors),
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::ServiceUnavailable(msg) => msg,
            AppError::Upstream(msg, err) => {
                tracing::error!(error = ?err, "Upstream call failed");
                msg
            }
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Unhandled error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::ConfigError(msg, err) => {
                tracing::error!(error = %err, "Configuration error");
                msg
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
            }),
        )
            .into_response()
    }
}
