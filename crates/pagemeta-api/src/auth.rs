//! Webhook authentication.
//!
//! HMAC first, bearer second. A request carrying both signature headers is
//! checked against the HMAC of its raw body; if that fails for any reason
//! the bearer token still gets a chance. A request carrying only a bearer
//! token is checked directly.

use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use pagemeta_core::signature;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Header carrying `sha256=<hex>`.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Header carrying the unix-millisecond timestamp that was signed.
pub const TIMESTAMP_HEADER: &str = "x-webhook-timestamp";

const BEARER_SCHEME: &str = "Bearer ";

/// Credential that authenticated a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Signature,
    Bearer,
}

/// Authenticate a webhook request against `secret`.
///
/// `raw_body` must be the bytes exactly as received. With a
/// `timestamp_tolerance`, a signature whose timestamp is further than the
/// tolerance from now is treated as a failed signature.
pub fn authenticate(
    headers: &HeaderMap,
    raw_body: &[u8],
    secret: &str,
    timestamp_tolerance: Option<Duration>,
) -> Option<AuthMethod> {
    let signature = header_str(headers, SIGNATURE_HEADER);
    let timestamp = header_str(headers, TIMESTAMP_HEADER);

    if let (Some(signature), Some(timestamp)) = (signature, timestamp) {
        if verify_signature(secret, signature, timestamp, raw_body, timestamp_tolerance) {
            return Some(AuthMethod::Signature);
        }
        debug!("Webhook signature did not verify; trying bearer token");
    }

    match bearer_token(headers) {
        Some(token) if tokens_match(token, secret) => Some(AuthMethod::Bearer),
        _ => None,
    }
}

fn verify_signature(
    secret: &str,
    signature: &str,
    timestamp: &str,
    raw_body: &[u8],
    tolerance: Option<Duration>,
) -> bool {
    if let Some(tolerance) = tolerance {
        let now_ms = chrono::Utc::now().timestamp_millis();
        if !timestamp_within(timestamp, tolerance, now_ms) {
            debug!(timestamp, "Webhook timestamp outside tolerance");
            return false;
        }
    }
    signature::verify(secret, signature, timestamp, raw_body)
}

/// Whether a unix-millisecond `timestamp` lies within `tolerance` of `now_ms`.
///
/// Unparseable timestamps are never within tolerance.
pub fn timestamp_within(timestamp: &str, tolerance: Duration, now_ms: i64) -> bool {
    let Ok(sent_ms) = timestamp.trim().parse::<i64>() else {
        return false;
    };
    let tolerance_ms = i64::try_from(tolerance.as_millis()).unwrap_or(i64::MAX);
    now_ms.abs_diff(sent_ms) <= tolerance_ms.unsigned_abs()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, AUTHORIZATION.as_str())?.strip_prefix(BEARER_SCHEME)
}

fn tokens_match(token: &str, secret: &str) -> bool {
    token.as_bytes().ct_eq(secret.as_bytes()).into()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
