//! Error types for Vantage API operations.
//!
//! This module provides the error hierarchy shared by every Vantage client
//! crate, including the HTTP status code mapping used by the transport.

use thiserror::Error;

/// Main error type for Vantage operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The server rejected the request credentials (HTTP 401). Carries the
    /// raw response body.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist (HTTP 404). Carries the raw
    /// response body.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP response, including transient server
    /// failures that outlived the retry budget.
    #[error("HTTP error {status}: {body}")]
    HttpError {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request timed out at the transport level.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The server could not be reached.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Transport-level failure that is neither a timeout nor a connection
    /// error (e.g. a malformed response stream).
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid UUID format
    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    /// Invalid resource slug
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Failed to parse a response body into the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid endpoint path or pagination link
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Vantage operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the stable error code for this error kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::HttpError { .. } => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUuid(_) => "INVALID_UUID",
            Self::InvalidSlug(_) => "INVALID_SLUG",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if the transport may retry the failed request.
    ///
    /// Only transport-level timeouts and connection failures are retryable
    /// here; retryable HTTP statuses are decided by the request loop itself.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::ServiceUnavailable(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidUuid(err.to_string())
    }
}
