//! Response bodies for the webhook app.

use serde::{Deserialize, Serialize};

// ============================================================================
// Response Types
// ============================================================================

/// Successful webhook response: `{ok: true, metadata: {revalidated, path}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub ok: bool,
    pub metadata: RevalidationMetadata,
}

impl WebhookResponse {
    /// A revalidation that ran for `path` (`None` meaning every path).
    pub fn revalidated(path: Option<String>) -> Self {
        Self {
            ok: true,
            metadata: RevalidationMetadata {
                revalidated: true,
                path,
            },
        }
    }

    /// An accepted event that required no work.
    pub fn ignored() -> Self {
        Self {
            ok: true,
            metadata: RevalidationMetadata {
                revalidated: false,
                path: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationMetadata {
    pub revalidated: bool,
    pub path: Option<String>,
}

/// Error response: `{ok: false, error, metadata?: {message}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ErrorMetadata>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            metadata: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.metadata = Some(ErrorMetadata {
            message: message.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMetadata {
    pub message: String,
}
