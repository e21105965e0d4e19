//! Authorization header construction.
//!
//! The header is built in two phases: the partial value (without signature)
//! is part of the canonical request, the signature is appended afterwards.

use crate::constants::EG1_HMAC_SHA256;
use crate::Credential;

/// Build the unsigned authorization header value.
///
/// ```text
/// EG1-HMAC-SHA256 client_token=<t>;access_token=<a>;timestamp=<ts>;nonce=<n>;
/// ```
pub fn partial_auth_header(cred: &Credential, timestamp: &str, nonce: &str) -> String {
    format!(
        "{EG1_HMAC_SHA256} client_token={};access_token={};timestamp={timestamp};nonce={nonce};",
        cred.client_token, cred.access_token
    )
}

/// Append the signature to a partial authorization header value.
pub fn final_auth_header(partial: &str, signature: &str) -> String {
    let mut value = String::with_capacity(partial.len() + signature.len() + 10);
    value.push_str(partial);
    if !partial.ends_with(';') {
        value.push(';');
    }
    value.push_str("signature=");
    value.push_str(signature);

    value
}
