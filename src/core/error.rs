//! Typed error handling for billed
//!
//! One top-level [`BilledError`] wraps a category enum per concern so
//! callers can match on what failed instead of on strings.
//!
//! # Error Categories
//!
//! - [`StoreError`]: the remote (mock) bill store rejected a call
//! - [`SessionError`]: the stored session could not be read
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RenderError`]: template rendering
//! - [`RequestError`]: malformed HTTP input
//!
//! Store errors keep the remote's message verbatim: the bills page shows
//! `Erreur 404` exactly as the store produced it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type
#[derive(Debug, Error)]
pub enum BilledError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response body for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl BilledError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BilledError::Store(e) => e.status_code(),
            BilledError::Session(_) => StatusCode::UNAUTHORIZED,
            BilledError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BilledError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BilledError::Request(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BilledError::Store(e) => e.error_code(),
            BilledError::Session(_) => "SESSION_ERROR",
            BilledError::Config(_) => "CONFIG_ERROR",
            BilledError::Render(_) => "RENDER_ERROR",
            BilledError::Request(_) => "REQUEST_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for BilledError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors returned by a bill store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The remote answered with an HTTP error status
    #[error("Erreur {status}")]
    Remote { status: u16 },

    /// No bill is stored under the given key
    #[error("Bill '{key}' not found")]
    NotFound { key: String },

    /// The bill under the given key is not an open draft of the caller
    #[error("Bill '{key}' cannot be changed")]
    NotEditable { key: String },

    /// The in-memory state could not be locked
    #[error("Store lock poisoned: {0}")]
    Lock(String),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Remote { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::NotEditable { .. } => StatusCode::CONFLICT,
            StoreError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Remote { .. } => "STORE_REMOTE_ERROR",
            StoreError::NotFound { .. } => "BILL_NOT_FOUND",
            StoreError::NotEditable { .. } => "BILL_NOT_EDITABLE",
            StoreError::Lock(_) => "STORE_LOCK_ERROR",
        }
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors reading the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No session was provided
    #[error("No active session")]
    Missing,

    /// The stored user object is not valid JSON or has an unknown type
    #[error("Malformed session: {message}")]
    Malformed { message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors rendering a view
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to render template '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to load templates: {0}")]
    Load(#[source] tera::Error),
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors in incoming HTTP input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid session header: {0}")]
    InvalidSessionHeader(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}
