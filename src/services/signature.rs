//! Webhook signature verification using HMAC-SHA256.
//!
//! Callers sign the raw request body with a shared secret and send the
//! lowercase hex digest in the `X-Signature` header. Verification operates on
//! the exact transmitted bytes, before any JSON parsing, because
//! re-serialization is not guaranteed to reproduce the original byte sequence.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 signature of a payload.
///
/// This is what a well-behaved webhook sender puts in the `X-Signature`
/// header; it is also used by the integration tests.
#[must_use]
pub fn sign(payload: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a hex signature against the payload and secret.
///
/// Returns `false` for malformed hex as well as for digest mismatches.
/// Comparison is constant time via the HMAC library.
#[must_use]
pub fn verify(payload: &[u8], provided_hex: &str, secret: &[u8]) -> bool {
    let Ok(provided) = hex::decode(provided_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);

    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let payload = b"{\"message_id\":\"m1\"}";
        let secret = b"test-secret";

        let sig = sign(payload, secret);
        assert!(verify(payload, &sig, secret));
    }

    #[test]
    fn wrong_secret_fails() {
        let payload = b"payload";
        let sig = sign(payload, b"correct-secret");

        assert!(!verify(payload, &sig, b"wrong-secret"));
    }

    #[test]
    fn single_byte_tamper_fails() {
        let payload = b"{\"message_id\":\"m1\"}".to_vec();
        let secret = b"test-secret";
        let sig = sign(&payload, secret);

        let mut tampered = payload.clone();
        tampered[3] ^= 0x01;
        assert!(!verify(&tampered, &sig, secret));
    }

    #[test]
    fn malformed_hex_fails_without_panic() {
        let payload = b"payload";
        let secret = b"secret";

        assert!(!verify(payload, "", secret));
        assert!(!verify(payload, "not-hex", secret));
        assert!(!verify(payload, "abc", secret), "odd-length hex");
        assert!(!verify(payload, "deadbeef", secret), "wrong length digest");
    }

    #[test]
    fn digest_is_lowercase_hex_of_sha256_width() {
        let sig = sign(b"any", b"any");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn uppercase_hex_of_valid_digest_still_verifies() {
        // hex::decode is case-insensitive; binding is to the digest bytes.
        let payload = b"payload";
        let secret = b"secret";
        let sig = sign(payload, secret).to_uppercase();

        assert!(verify(payload, &sig, secret));
    }

    #[test]
    fn empty_payload_signs_and_verifies() {
        let sig = sign(b"", b"secret");
        assert!(verify(b"", &sig, b"secret"));
        assert!(!verify(b"x", &sig, b"secret"));
    }
}
