//! HTTP error handling and response conversion.
//!
//! Classified provider failures map onto distinct status codes so operators
//! can tell a transient outage (503) from a rejected upstream credential
//! (502) and from caller mistakes (400/404). Every error body carries the
//! stable `kind` identifier alongside a user-safe message.

use crate::domain::{detection::errors::DetectionError, weather::errors::WeatherError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Caller input malformed (400).
    InvalidParameters(String),

    /// Provider rejected the uploaded content (400).
    InvalidImage(String),

    /// Location did not resolve at the provider (404).
    LocationNotFound(String),

    /// Transient provider or network fault (503).
    ProviderUnavailable(String),

    /// Upstream credential rejected or missing (502).
    UpstreamAuth(String),

    /// Admission control rejected the request (429).
    Busy,

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            Self::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            Self::LocationNotFound(msg) => write!(f, "Location not found: {}", msg),
            Self::ProviderUnavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            Self::UpstreamAuth(msg) => write!(f, "Upstream auth failure: {}", msg),
            Self::Busy => write!(f, "Server is busy"),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ApiError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParameters(_) | Self::InvalidImage(_) => StatusCode::BAD_REQUEST,
            Self::LocationNotFound(_) => StatusCode::NOT_FOUND,
            Self::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamAuth(_) => StatusCode::BAD_GATEWAY,
            Self::Busy => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable identifier matching the branch error payload taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::InvalidImage(_) => "invalid_image",
            Self::LocationNotFound(_) => "location_not_found",
            Self::ProviderUnavailable(_) => "provider_unavailable",
            Self::UpstreamAuth(_) => "auth_error",
            Self::Busy => "busy",
            Self::Internal(_) => "internal",
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::InvalidParameters(msg) => msg.clone(),
            Self::InvalidImage(msg) => msg.clone(),
            Self::LocationNotFound(msg) => format!("Location '{}' not found", msg),
            Self::ProviderUnavailable(_) => "External provider unavailable".into(),
            Self::UpstreamAuth(_) => "Provider credential rejected or missing".into(),
            Self::Busy => "Server is busy. Please slow down live uploads or reduce FPS.".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                tracing::warn!("error={}", self);
            }
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::debug!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message, "kind": self.kind() }))).into_response()
    }
}

// === Classified Client Error Conversion ===

impl From<DetectionError> for ApiError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::InvalidImage(msg) => ApiError::InvalidImage(msg),
            DetectionError::ProviderUnavailable(msg) => ApiError::ProviderUnavailable(msg),
            DetectionError::Auth(msg) => ApiError::UpstreamAuth(msg),
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::InvalidParameters(msg) => ApiError::InvalidParameters(msg),
            WeatherError::LocationNotFound(location) => ApiError::LocationNotFound(location),
            WeatherError::ProviderUnavailable(msg) => ApiError::ProviderUnavailable(msg),
            WeatherError::Auth(msg) => ApiError::UpstreamAuth(msg),
        }
    }
}

// === General Fallback Error Conversion ===

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(anyhow_error = %err, "Unclassified error with chain");
        err.chain().for_each(|cause| {
            tracing::error!(cause = %cause, "Error source");
        });
        ApiError::Internal("Operation failed".into())
    }
}
