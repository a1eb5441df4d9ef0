//! Error types for transport-level HTTP failures.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Only failures that prevent a complete response from being received
/// appear here. A response with any status code, including 4xx and 5xx,
/// is a successful exchange at this layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and connections reset before response headers arrived.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    ///
    /// This is a configuration error rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response headers were received but reading the body failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HttpError {
    /// Returns true if the failure is potentially transient and the same
    /// request may be sent again.
    ///
    /// A body read failure is not retried: the broker already acted on the
    /// request, and replaying a create could duplicate it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}
