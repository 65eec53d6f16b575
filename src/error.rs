//! Unified error types for the dashboard client.

use thiserror::Error;

/// Application-level error type.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The API transport could not be constructed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// JSON output error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A remote call failed.
///
/// The access layer never hands this to its callers: every operation turns
/// it into the operation's fallback envelope, carrying only the
/// [`Display`](std::fmt::Display) text. The variants exist for logging.
#[derive(Error, Debug)]
pub enum ApiError {
    /// reqwest failed to connect, send, or read the body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Network failure reported by a non-reqwest transport.
    #[error("{0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {path}")]
    Status {
        /// Endpoint path that was called.
        path: &'static str,
        /// Status code returned.
        status: u16,
    },

    /// The body was not a JSON object.
    #[error("invalid response body: {0}")]
    Parse(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, DashboardError>;
