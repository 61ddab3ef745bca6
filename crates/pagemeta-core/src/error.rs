//! Error types for PageMeta core operations.
//!
//! Transport failures never reach page rendering: the resolver logs them and
//! degrades to fallback-only metadata. They are still typed so transports and
//! diagnostics can classify them.

use thiserror::Error;

/// Failure to obtain a metadata document from the remote service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connectivity, DNS, TLS or timeout failure.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with a non-success status.
    #[error("PageMeta API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded as a metadata document.
    #[error("Failed to decode metadata response: {message}")]
    Decode { message: String },

    /// The service answered successfully but without a document.
    #[error("Metadata response contained no data")]
    EmptyResponse,

    /// A proxied transport reported an error from behind its boundary.
    #[error("Proxied metadata call failed: {message}")]
    Proxy { message: String },

    /// The transport could not be constructed from configuration.
    #[error("Invalid transport configuration: {message}")]
    Configuration { message: String },
}

impl TransportError {
    /// Check if this error represents a transient condition that may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. } => false,
            Self::EmptyResponse => false,
            Self::Proxy { .. } => true,
            Self::Configuration { .. } => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Network {
                message: e.to_string(),
            }
        }
    }
}

/// Failure reported by a framework revalidation hook.
#[derive(Debug, Error)]
#[error("Revalidation failed: {message}")]
pub struct RevalidateError {
    pub message: String,
}

impl RevalidateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure to compute a webhook signature.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The secret cannot be used as an HMAC key.
    #[error("Invalid HMAC key: {message}")]
    InvalidKey { message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
