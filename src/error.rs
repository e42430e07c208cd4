//! # Client Error Types
//!
//! Unified error handling for the secretsd client library.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for client operations
///
/// Every backend-originated fault surfaces as [`ClientError::Rpc`] with the
/// original `tonic::Status` preserved as the error source, so callers can
/// inspect the underlying code and message. Caller-side cancellation is a
/// separate variant and is never folded into `Rpc`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rpc failed: {} - {}", .0.code(), .0.message())]
    Rpc(#[source] tonic::Status),

    #[error("operation cancelled before completion")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },
}

impl ClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error
    pub fn connect(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid response error for protocol violations
    ///
    /// Use this when a reply is missing required fields or contains
    /// malformed data. This indicates a protocol violation that should not
    /// be silently defaulted.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The gRPC status code of the underlying transport fault, if any
    #[must_use]
    pub fn rpc_code(&self) -> Option<tonic::Code> {
        match self {
            ClientError::Rpc(status) => Some(status.code()),
            _ => None,
        }
    }

    /// Check if error is recoverable (worth retrying)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Rpc(status) => matches!(
                status.code(),
                tonic::Code::Unavailable
                    | tonic::Code::DeadlineExceeded
                    | tonic::Code::ResourceExhausted
            ),
            ClientError::Connect { .. } => true,
            // Cancellation is the caller's own signal - retrying it is never right
            ClientError::Cancelled => false,
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }
}
