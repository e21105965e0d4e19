//! Reqwest-based HTTP transport for edgegrid.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `edgegrid_core` on
//! top of a `reqwest::Client`. Timeouts, TLS and connection pooling are
//! configured on the client itself.
//!
//! ```no_run
//! use edgegrid_core::Context;
//! use edgegrid_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), reqwest::Error> {
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use edgegrid_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// HttpSend implementation backed by `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert http request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send http request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read http response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
