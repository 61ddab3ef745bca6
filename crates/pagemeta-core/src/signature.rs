//! HMAC-SHA256 signing and verification for revalidation webhooks.
//!
//! The signed message is `<timestamp>.<raw body>`. The body must be the raw
//! bytes as received; re-serializing a parsed payload can reorder keys or
//! change whitespace and break verification.
//!
//! The signature header has the form `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Prefix of the `X-Webhook-Signature` header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the hex-encoded HMAC-SHA256 of `message` under `secret`.
///
/// # Errors
///
/// Returns `SignatureError::InvalidKey` if the secret cannot be used as an
/// HMAC key.
pub fn sign(secret: &str, message: &[u8]) -> Result<String, SignatureError> {
    let mut mac = new_mac(secret)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Build the message that is signed for a webhook delivery.
pub fn signed_message(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(timestamp.len() + 1 + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.push(b'.');
    message.extend_from_slice(body);
    message
}

/// Produce a complete `sha256=<hex>` header value for a delivery.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::signature::{signature_header, verify};
///
/// let body = br#"{"_type":"metadata_update","path":"/blog"}"#;
/// let header = signature_header("s3cret", "1700000000000", body).unwrap();
///
/// assert!(header.starts_with("sha256="));
/// assert!(verify("s3cret", &header, "1700000000000", body));
/// ```
pub fn signature_header(
    secret: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<String, SignatureError> {
    let digest = sign(secret, &signed_message(timestamp, body))?;
    Ok(format!("{}{}", SIGNATURE_PREFIX, digest))
}

/// Verify a `sha256=<hex>` signature over `<timestamp>.<raw_body>`.
///
/// A header without the `sha256=` prefix, or with a body that is not valid
/// hex, is rejected before any digest is computed. The digest comparison is
/// constant-time. No timestamp window is enforced here.
pub fn verify(secret: &str, signature_header: &str, timestamp: &str, raw_body: &[u8]) -> bool {
    let Some(hex_signature) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(provided) = hex::decode(hex_signature) else {
        return false;
    };

    let Ok(mut mac) = new_mac(secret) else {
        return false;
    };
    mac.update(&signed_message(timestamp, raw_body));

    mac.verify_slice(&provided).is_ok()
}

fn new_mac(secret: &str) -> Result<HmacSha256, SignatureError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| SignatureError::InvalidKey {
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
