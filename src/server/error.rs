//! API error types and handling.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::FarmError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Extractor rejection that keeps its own status (413, multipart errors)
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{provider} returned a non-JSON response")]
    NonJson {
        provider: &'static str,
        message: String,
    },

    #[error("{0}")]
    Internal(String),
}

/// Error body is `{"error": "..."}`, with an optional `message`.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(status, _) => *status,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::NonJson { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Undecodable request body. Everything but an oversized body is a 400.
    fn undecodable(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::Rejected(status, text)
        } else {
            ApiError::BadRequest(text)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let error = self.to_string();
        let message = match self {
            ApiError::NonJson { message, .. } => Some(message),
            _ => None,
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<FarmError> for ApiError {
    fn from(err: FarmError) -> Self {
        match err {
            FarmError::MalformedInput(_) => ApiError::BadRequest(err.to_string()),
            FarmError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            FarmError::UpstreamUnavailable(_) | FarmError::Http(_) => {
                ApiError::BadGateway(err.to_string())
            }
            FarmError::NonJsonResponse { provider, body } => ApiError::NonJson {
                provider,
                message: body,
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::undecodable(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::undecodable(rejection.status(), rejection.body_text())
    }
}
