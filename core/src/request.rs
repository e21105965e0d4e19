use std::borrow::Cow;
use std::str::FromStr;

use bytes::Bytes;
use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use http::Version;

use crate::{Error, Result};

/// Signing context for request.
///
/// A `SigningRequest` owns every part of the outgoing request, the signer
/// hands back a new value instead of mutating a transport owned object.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority, host with optional port.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// Raw HTTP query, without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// HTTP body, exactly the bytes that will be transmitted.
    pub body: Bytes,

    version: Version,
}

impl SigningRequest {
    /// Build a signing context from `http::Request`.
    ///
    /// Requests without scheme are treated as `https`, requests without
    /// authority can't be signed.
    pub fn build(req: http::Request<Bytes>) -> Result<Self> {
        let (parts, body) = req.into_parts();
        let uri = parts.uri.into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method,
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: match paq.path() {
                "" => "/".to_string(),
                v => v.to_string(),
            },
            query: paq.query().map(|v| v.to_string()),
            headers: parts.headers,
            body,

            version: parts.version,
        })
    }

    /// Convert the signing context back into `http::Request`.
    pub fn into_request(self) -> Result<http::Request<Bytes>> {
        let resource = self.resource().into_owned();

        let mut uri_parts = http::uri::Parts::default();
        uri_parts.scheme = Some(self.scheme);
        uri_parts.authority = Some(self.authority);
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&resource)?);

        let mut req = http::Request::new(self.body);
        *req.method_mut() = self.method;
        *req.uri_mut() = Uri::from_parts(uri_parts)?;
        *req.version_mut() = self.version;
        *req.headers_mut() = self.headers;

        Ok(req)
    }

    /// Host of this request, including the port if the url carries one.
    #[inline]
    pub fn host(&self) -> &str {
        self.authority.as_str()
    }

    /// Path plus query of this request.
    ///
    /// ```shell
    /// ("/ccu/v2/purges/1", Some("a=b")) => "/ccu/v2/purges/1?a=b"
    /// ```
    pub fn resource(&self) -> Cow<'_, str> {
        match &self.query {
            Some(query) => Cow::Owned(format!("{}?{}", self.path, query)),
            None => Cow::Borrowed(&self.path),
        }
    }

    /// Get header value by name.
    ///
    /// Returns `None` if header not found.
    #[inline]
    pub fn header_get(&self, key: &HeaderName) -> Result<Option<&str>> {
        match self.headers.get(key) {
            Some(v) => Ok(Some(v.to_str()?)),
            None => Ok(None),
        }
    }

    /// Normalize header value.
    ///
    /// Leading and trailing whitespace is removed and every inner run of
    /// whitespace is collapsed into a single space.
    pub fn header_value_normalize(v: &str) -> String {
        v.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
