//! Error types for the webhook app

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pagemeta_core::RevalidateError;
use tracing::{error, warn};

use crate::responses::ErrorResponse;

/// Webhook handler errors with HTTP status code mapping
///
/// - `500 Internal Server Error`: no webhook secret configured, or the
///   revalidation hook failed
/// - `401 Unauthorized`: neither HMAC nor bearer credentials verified
/// - `404 Not Found`: unmatched route or a non-POST request
/// - `400 Bad Request`: body is not a valid webhook payload
///
/// Authentication, not-found and payload errors are raised before any cache
/// entry is touched.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// The webhook secret was never configured.
    ///
    /// Maps to: `500 Internal Server Error` for every request, whatever its
    /// credentials.
    #[error("webhook secret is not configured")]
    NotConfigured,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    /// Maps to: `400 Bad Request` (permanent error, do not retry)
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    /// The framework revalidation hook reported a failure.
    ///
    /// Maps to: `500 Internal Server Error` with the hook's message under
    /// `metadata.message`.
    #[error("Revalidation failed")]
    RevalidationFailed(#[source] RevalidateError),
}

impl WebhookHandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured | Self::RevalidationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::NotConfigured => {
                error!("Rejecting webhook: webhook secret is not configured");
                ErrorResponse::new(self.to_string())
            }
            Self::Unauthorized => {
                warn!("Rejecting webhook: credentials did not verify");
                ErrorResponse::new(self.to_string())
            }
            Self::NotFound => ErrorResponse::new(self.to_string()),
            Self::InvalidPayload { message } => {
                warn!(error = %message, "Rejecting webhook: invalid payload");
                ErrorResponse::new(self.to_string())
            }
            Self::RevalidationFailed(e) => {
                error!(error = %e, "Revalidation hook failed");
                ErrorResponse::new(self.to_string()).with_message(e.message.clone())
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration loading failed: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
