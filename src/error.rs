//! Error types for artwork-table
//!
//! This module provides error handling for the library, including:
//! - The crate-wide [`Error`] type and [`Result`] alias
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for artwork-table operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for artwork-table
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "source.base_url")
        key: Option<String>,
    },

    /// Request rejected before any I/O (bad page number, page size, count)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found (e.g. an artwork that is neither displayed nor selected)
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation conflicts with one already in progress
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network error talking to the upstream API
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream API answered with a non-success status
    #[error("upstream returned HTTP {status} for {url}")]
    Upstream {
        /// HTTP status code returned by the upstream API
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Upstream body could not be decoded as an artwork page
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "upstream_error",
///     "message": "upstream returned HTTP 503 for https://api.artic.edu/api/v1/artworks",
///     "details": {
///       "status": 503
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "invalid_request")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidRequest(_) => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,

            // 409 Conflict
            Error::Conflict(_) => 409,

            // 502 Bad Gateway - Upstream API failures
            Error::Network(_) => 502,
            Error::Upstream { .. } => 502,
            Error::Decode(_) => 502,

            // 500 Internal Server Error
            Error::Serialization(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Network(_) => "network_error",
            Error::Upstream { .. } => "upstream_error",
            Error::Decode(_) => "decode_error",
            Error::Serialization(_) => "serialization_error",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::Upstream { status, url } => Some(serde_json::json!({
                "status": status,
                "url": url,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
