//! Canonical request construction for EG1-HMAC-SHA256.

use http::header::HeaderName;
use http::Method;
use log::debug;

use edgegrid_core::hash::base64_sha256;
use edgegrid_core::{Result, SigningRequest};

/// Number of tab separated fields in a canonical request.
pub const CANONICAL_REQUEST_FIELDS: usize = 7;

/// Content hash of the request body.
///
/// Only methods carrying a body are hashed, and at most `max_body` bytes of it.
/// Returns an empty string otherwise, including when `max_body` is zero.
pub fn content_hash(req: &SigningRequest, max_body: usize) -> String {
    if !carries_body(&req.method) || req.body.is_empty() || max_body == 0 {
        return String::new();
    }

    let body = &req.body[..req.body.len().min(max_body)];
    if body.len() < req.body.len() {
        debug!(
            "body of {} bytes exceeds max body {max_body}, hashing truncated content",
            req.body.len()
        );
    }

    base64_sha256(body)
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Canonicalize the headers selected for signing.
///
/// ```text
/// name1:value1 \t name2:value2
/// ```
///
/// Headers are emitted in the order of `headers_to_sign`, absent headers are
/// skipped. Values are trimmed with inner whitespace collapsed.
pub fn canonicalize_headers(
    req: &SigningRequest,
    headers_to_sign: &[HeaderName],
) -> Result<String> {
    let mut pairs = Vec::with_capacity(headers_to_sign.len());
    for name in headers_to_sign {
        if let Some(value) = req.header_get(name)? {
            pairs.push(format!(
                "{}:{}",
                name.as_str().to_lowercase(),
                SigningRequest::header_value_normalize(value)
            ));
        }
    }

    Ok(pairs.join("\t"))
}

/// Construct canonical request
///
/// ## Format
///
/// ```text
/// METHOD + "\t" +
/// scheme + "\t" +
/// host + "\t" +
/// path?query + "\t" +
/// CanonicalizedHeaders + "\t" +
/// ContentHash + "\t" +
/// PartialAuthorization
/// ```
pub fn canonical_request(
    req: &SigningRequest,
    headers_to_sign: &[HeaderName],
    content_hash: &str,
    partial_auth_header: &str,
) -> Result<String> {
    let headers = canonicalize_headers(req, headers_to_sign)?;
    let resource = req.resource();

    debug!(
        "canonical request for {} {}://{}{}, signed headers: {:?}",
        req.method,
        req.scheme,
        req.host(),
        resource,
        headers_to_sign
    );

    Ok([
        req.method.as_str(),
        req.scheme.as_str(),
        req.host(),
        &*resource,
        headers.as_str(),
        content_hash,
        partial_auth_header,
    ]
    .join("\t"))
}
