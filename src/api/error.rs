//! Error types for resource operations.

use std::fmt;

use thiserror::Error;

use crate::transport::HttpError;

/// Phase of a resource operation in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Encoding the payload or building the request.
    Request,
    /// Sending the request and waiting for a response.
    Execute,
    /// Reading or interpreting the response.
    Response,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Request => "request",
            Self::Execute => "execute",
            Self::Response => "response",
        })
    }
}

/// Error type for gateway and hook operations.
///
/// The `Display` text starts with the failing [`Phase`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The record could not be encoded as JSON.
    #[error("request: failed to encode payload: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The resource URL could not be built from the base URL.
    #[error("request: invalid resource path under '{0}'")]
    InvalidPath(String),

    /// No complete response was received; retries, if any, are exhausted.
    #[error("{}: {}", transport_phase(.0), .0)]
    Transport(#[from] HttpError),

    /// The broker answered with a status other than the expected one.
    #[error("response: unexpected status {status}: {body}")]
    Api {
        /// Status returned by the broker
        status: http::StatusCode,
        /// Raw response body
        body: String,
    },

    /// The response body is not valid JSON for the expected record.
    #[error("response: failed to decode payload: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ClientError {
    /// Returns the phase in which the operation failed.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Serialization(_) | Self::InvalidPath(_) => Phase::Request,
            Self::Transport(e) => transport_phase(e),
            Self::Api { .. } | Self::Deserialization(_) => Phase::Response,
        }
    }

    /// Returns the HTTP status for [`ClientError::Api`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

const fn transport_phase(error: &HttpError) -> Phase {
    match error {
        HttpError::InvalidUrl(_) => Phase::Request,
        HttpError::Body(_) => Phase::Response,
        HttpError::Connection(_) | HttpError::Timeout => Phase::Execute,
    }
}
