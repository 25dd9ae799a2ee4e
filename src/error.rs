//! Error types for the Health API Service

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Health API Service
#[derive(Error, Debug)]
pub enum Error {
    /// Host metrics could not be collected
    #[error("Unable to gather system information: {0}")]
    SystemInfo(String),

    /// Wall clock could not be read
    #[error("Clock error: {0}")]
    Clock(String),

    /// Response serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// =============================================================================
// HTTP Errors
// =============================================================================

/// Fixed detail returned by the simple health endpoint on failure
pub const SIMPLE_HEALTH_FAILURE: &str = "Health check failed";

/// Errors surfaced to HTTP clients.
///
/// Each variant owns its status code and JSON body. Handler failures keep
/// the per-endpoint wording, everything else collapses into the generic
/// internal error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Health handler failed; `detail` is sent verbatim
    #[error("{detail}")]
    HealthCheck { detail: String },

    /// Failure nothing closer to the source handled
    #[error("Internal server error")]
    Unhandled,

    /// No route matched the path
    #[error("Not Found")]
    NotFound,

    /// Route exists but not for this method
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

#[derive(Serialize)]
struct DetailBody<'a> {
    detail: &'a str,
}

#[derive(Serialize)]
struct UnhandledBody {
    error: &'static str,
    detail: &'static str,
}

impl ApiError {
    /// Failure of the detailed health endpoint, leaking the cause text
    pub fn detailed_health(err: &Error) -> Self {
        ApiError::HealthCheck {
            detail: format!("{}: {}", SIMPLE_HEALTH_FAILURE, err),
        }
    }

    /// Failure of the simple health endpoint, with a fixed message
    pub fn simple_health() -> Self {
        ApiError::HealthCheck {
            detail: SIMPLE_HEALTH_FAILURE.to_string(),
        }
    }

    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::HealthCheck { .. } | ApiError::Unhandled => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// JSON body for this error
    pub fn body(&self) -> Bytes {
        let encoded = match self {
            ApiError::HealthCheck { detail } => serde_json::to_vec(&DetailBody { detail }),
            ApiError::Unhandled => serde_json::to_vec(&UnhandledBody {
                error: "Internal server error",
                detail: "An unexpected error occurred",
            }),
            ApiError::NotFound => serde_json::to_vec(&DetailBody {
                detail: "Not Found",
            }),
            ApiError::MethodNotAllowed => serde_json::to_vec(&DetailBody {
                detail: "Method Not Allowed",
            }),
        };
        // Plain string structs always encode
        Bytes::from(encoded.unwrap_or_default())
    }

    /// Build the full HTTP response
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body()));
        *response.status_mut() = self.status();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if self == ApiError::MethodNotAllowed {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("GET"));
        }
        response
    }
}

// =============================================================================
// Tests
// =============================================================================
