//! Application error type and its HTTP representation.
//!
//! Every failure a handler can produce is an [`AppError`]. Validation and
//! provider failures become `400`, store failures `500`. The current-weather
//! endpoint re-maps provider failures to `404` via
//! [`AppError::provider_as_not_found`].
//!
//! All error responses share one body shape:
//!
//! ```json
//! { "error": "Date cannot be in the past" }
//! ```
//!
//! Field-level validation failures add a `details` object.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::provider::ProviderError;
use crate::utils::forecast_validation::DateRangeError;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A required query parameter is absent or empty. Holds the full message.
    #[error("{0}")]
    MissingParameter(String),

    #[error("Invalid date format. Expected dd.MM.yyyy")]
    InvalidDateFormat,

    #[error(transparent)]
    DateOutOfRange(#[from] DateRangeError),

    #[error("min_temperature cannot be greater than max_temperature")]
    TemperatureRangeInvalid,

    /// Malformed request body or field-level validation failure.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn missing_parameter(message: impl Into<String>) -> Self {
        Self::MissingParameter(message.into())
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Turns a provider failure into `404 Not Found`, leaving other errors untouched.
    ///
    /// The current-weather endpoint reports unknown cities as missing resources,
    /// while the forecast endpoint keeps them as `400`.
    pub fn provider_as_not_found(self) -> Self {
        match self {
            Self::Provider(e) => Self::NotFound(e.to_string()),
            other => other,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_)
            | Self::InvalidDateFormat
            | Self::DateOutOfRange(_)
            | Self::TemperatureRangeInvalid
            | Self::Validation { .. }
            | Self::Provider(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let details = match self {
            Self::Validation { details, .. } if !details.is_null() => Some(details.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::internal("Database error")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
