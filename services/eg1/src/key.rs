//! Signing key derivation.
//!
//! ```text
//! signing_key = base64(HMAC-SHA256(key = client_secret, message = timestamp))
//! signature   = base64(HMAC-SHA256(key = signing_key, message = canonical_request))
//! ```
//!
//! The key of the second HMAC is the base64 *text* of the signing key, not
//! its decoded bytes.

use edgegrid_core::hash::base64_hmac_sha256;

/// Derive the timestamp scoped signing key from the client secret.
pub fn signing_key(client_secret: &str, timestamp: &str) -> String {
    base64_hmac_sha256(client_secret.as_bytes(), timestamp.as_bytes())
}

/// Sign the canonical request with a signing key.
pub fn sign(signing_key: &str, canonical_request: &str) -> String {
    base64_hmac_sha256(signing_key.as_bytes(), canonical_request.as_bytes())
}
