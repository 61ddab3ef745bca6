//! Tests for webhook authentication precedence.

use super::*;
use axum::http::HeaderValue;
use pagemeta_core::signature::signature_header;

const SECRET: &str = "whsec_test";
const BODY: &[u8] = br#"{"_type":"metadata_update","path":"/blog/hello"}"#;
const TIMESTAMP: &str = "1700000000000";

fn signed_headers(secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let signature = signature_header(secret, TIMESTAMP, BODY).unwrap();
    headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());
    headers.insert(TIMESTAMP_HEADER, HeaderValue::from_static(TIMESTAMP));
    headers
}

fn with_bearer(mut headers: HeaderMap, token: &str) -> HeaderMap {
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

// ============================================================================
// Precedence Tests
// ============================================================================

mod precedence_tests {
    use super::*;

    #[test]
    fn test_valid_signature_authenticates() {
        let headers = signed_headers(SECRET);

        assert_eq!(
            authenticate(&headers, BODY, SECRET, None),
            Some(AuthMethod::Signature)
        );
    }

    /// Verify a valid signature wins even when the bearer token is wrong.
    #[test]
    fn test_valid_signature_with_invalid_bearer() {
        let headers = with_bearer(signed_headers(SECRET), "wrong");

        assert_eq!(
            authenticate(&headers, BODY, SECRET, None),
            Some(AuthMethod::Signature)
        );
    }

    /// Verify an invalid signature falls back to a valid bearer token.
    #[test]
    fn test_invalid_signature_falls_back_to_bearer() {
        let headers = with_bearer(signed_headers("other-secret"), SECRET);

        assert_eq!(
            authenticate(&headers, BODY, SECRET, None),
            Some(AuthMethod::Bearer)
        );
    }

    #[test]
    fn test_both_invalid_rejected() {
        let headers = with_bearer(signed_headers("other-secret"), "wrong");

        assert_eq!(authenticate(&headers, BODY, SECRET, None), None);
    }

    #[test]
    fn test_no_credentials_rejected() {
        assert_eq!(authenticate(&HeaderMap::new(), BODY, SECRET, None), None);
    }

    #[test]
    fn test_bearer_only() {
        let headers = with_bearer(HeaderMap::new(), SECRET);

        assert_eq!(
            authenticate(&headers, BODY, SECRET, None),
            Some(AuthMethod::Bearer)
        );
    }

    /// Verify a signature alone without its timestamp is not attempted.
    #[test]
    fn test_signature_without_timestamp_rejected() {
        let mut headers = signed_headers(SECRET);
        headers.remove(TIMESTAMP_HEADER);

        assert_eq!(authenticate(&headers, BODY, SECRET, None), None);
    }

    /// Verify the signature covers the exact raw bytes.
    #[test]
    fn test_altered_body_rejected() {
        let headers = signed_headers(SECRET);
        let altered = br#"{"_type":"metadata_update","path":"/blog/other"}"#;

        assert_eq!(authenticate(&headers, altered, SECRET, None), None);
    }

    #[test]
    fn test_bearer_prefix_of_secret_rejected() {
        let headers = with_bearer(HeaderMap::new(), "whsec");

        assert_eq!(authenticate(&headers, BODY, SECRET, None), None);
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic whsec_test"));

        assert_eq!(authenticate(&headers, BODY, SECRET, None), None);
    }
}

// ============================================================================
// Timestamp Tolerance Tests
// ============================================================================

mod tolerance_tests {
    use super::*;

    const NOW_MS: i64 = 1_700_000_000_000;

    #[test]
    fn test_within_tolerance() {
        assert!(timestamp_within("1699999700000", Duration::from_secs(300), NOW_MS));
        assert!(timestamp_within("1700000300000", Duration::from_secs(300), NOW_MS));
    }

    #[test]
    fn test_outside_tolerance() {
        assert!(!timestamp_within("1699999699999", Duration::from_secs(300), NOW_MS));
    }

    #[test]
    fn test_unparseable_timestamp() {
        assert!(!timestamp_within("yesterday", Duration::from_secs(300), NOW_MS));
    }

    /// Verify a stale signature falls back to bearer rather than passing.
    #[test]
    fn test_stale_signature_falls_back_to_bearer() {
        let headers = signed_headers(SECRET);
        let tolerance = Some(Duration::from_secs(60));

        assert_eq!(authenticate(&headers, BODY, SECRET, tolerance), None);

        let headers = with_bearer(signed_headers(SECRET), SECRET);
        assert_eq!(
            authenticate(&headers, BODY, SECRET, tolerance),
            Some(AuthMethod::Bearer)
        );
    }
}
