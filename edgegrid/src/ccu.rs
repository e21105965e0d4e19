//! Client for the Content Control Utility (CCU) v2 purge API.
//!
//! | operation | request |
//! |---|---|
//! | [`PurgeClient::get_purge_status`] | `GET {base}/ccu/v2/purges/{purge_id}` |
//! | [`PurgeClient::purge_request`] | `POST {base}/ccu/v2/queues/default` |
//! | [`PurgeClient::check_queue_length`] | `GET {base}/ccu/v2/queues/default` |
//!
//! Successful responses are returned as raw JSON, fields such as `httpStatus`,
//! `detail` or `purgeId` are left to the caller.

use bytes::Bytes;
use http::{Method, StatusCode, Uri};
use log::debug;
use serde::Serialize;
use serde_json::Value;

use edgegrid_core::{Context, Signer};
use edgegrid_eg1::{
    Config, Credential, DefaultCredentialProvider, RequestSigner, StaticCredentialProvider,
};

const PURGES_PATH: &str = "ccu/v2/purges";
const DEFAULT_QUEUE_PATH: &str = "ccu/v2/queues/default";

/// Errors returned by [`PurgeClient`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("the api call finished with status {status} but it was expected 2xx, response content:\n\n{body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body, lossily decoded as utf-8.
        body: String,
    },
    /// The server answered with 2xx but the body is not json.
    #[error("the response status {status} is successful but the content is not valid json")]
    MalformedResponse {
        /// Response status.
        status: StatusCode,
        /// Response body, lossily decoded as utf-8.
        body: String,
        /// Decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The client is misconfigured.
    #[error("invalid purge client config: {0}")]
    Config(String),
    /// The request could not be built or signed, nothing was sent.
    #[error("failed to sign request")]
    Sign(#[source] edgegrid_core::Error),
    /// The transport failed to deliver the request.
    #[error("failed to send request")]
    Transport(#[source] edgegrid_core::Error),
}

/// What the edge servers do with purged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeAction {
    /// Drop the content from cache.
    Remove,
    /// Mark the content stale, forcing revalidation.
    Invalidate,
}

/// Network the purge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeDomain {
    /// Production network.
    Production,
    /// Staging network.
    Staging,
}

/// How `objects` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeType {
    /// Urls or ARLs.
    Arl,
    /// CP codes.
    Cpcode,
}

/// Body of a purge request.
///
/// Unset options are omitted and the server defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeRequest {
    /// Urls or CP codes to purge.
    pub objects: Vec<String>,
    /// Purge action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PurgeAction>,
    /// Target network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<PurgeDomain>,
    /// Object type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PurgeType>,
}

impl PurgeRequest {
    /// Create a purge request for `objects`.
    pub fn new<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            objects: objects.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the purge action.
    pub fn with_action(mut self, action: PurgeAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the target network.
    pub fn with_domain(mut self, domain: PurgeDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set the object type.
    pub fn with_type(mut self, kind: PurgeType) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// PurgeClient sends signed requests to the CCU v2 API.
#[derive(Debug, Clone)]
pub struct PurgeClient {
    signer: Signer<Credential>,
    base_url: String,
}

impl PurgeClient {
    /// Create a new client.
    ///
    /// `base_url` must be an absolute `http` or `https` url, a trailing `/` is ignored.
    pub fn new(signer: Signer<Credential>, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            signer,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Create a new client from config.
    ///
    /// Credentials set on `cfg` are used as is and validated here. Only a
    /// config without any credential field falls back to
    /// [`DefaultCredentialProvider`].
    pub fn from_config(ctx: Context, cfg: Config) -> Result<Self, Error> {
        let base_url = cfg
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Config("base url is required".to_string()))?;
        let builder = RequestSigner::from_config(&cfg).map_err(|e| Error::Config(e.to_string()))?;

        let signer = match cfg.credential().map_err(Error::Sign)? {
            Some(cred) => Signer::new(ctx, StaticCredentialProvider::from(cred), builder),
            None => Signer::new(ctx, DefaultCredentialProvider::new(), builder),
        };

        Self::new(signer, base_url)
    }

    /// The normalized base url.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the status of a previous purge.
    ///
    /// An id that would change the request path is rejected before signing.
    pub async fn get_purge_status(&self, purge_id: &str) -> Result<Option<Value>, Error> {
        if purge_id.is_empty() || purge_id.contains(['/', '?', '#']) {
            return Err(Error::Sign(edgegrid_core::Error::request_invalid(format!(
                "invalid purge id: {purge_id:?}"
            ))));
        }

        self.call(
            Method::GET,
            &format!("{PURGES_PATH}/{purge_id}"),
            Bytes::new(),
        )
        .await
    }

    /// Submit a purge to the default queue.
    pub async fn purge_request(&self, request: &PurgeRequest) -> Result<Option<Value>, Error> {
        let body = serde_json::to_vec(request).map_err(|e| {
            Error::Sign(
                edgegrid_core::Error::request_invalid("failed to serialize purge request")
                    .with_source(e),
            )
        })?;

        self.call(Method::POST, DEFAULT_QUEUE_PATH, Bytes::from(body))
            .await
    }

    /// Check the length of the default queue.
    pub async fn check_queue_length(&self) -> Result<Option<Value>, Error> {
        self.call(Method::GET, DEFAULT_QUEUE_PATH, Bytes::new())
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn call(&self, method: Method, path: &str, body: Bytes) -> Result<Option<Value>, Error> {
        let url = self.url(path);
        let req = http::Request::builder()
            .method(method.clone())
            .uri(&url)
            .body(body)
            .map_err(|e| Error::Sign(e.into()))?;

        let req = self.signer.sign(req).await.map_err(Error::Sign)?;

        debug!("sending {method} {url}");
        let resp = self
            .signer
            .context()
            .http_send(req)
            .await
            .map_err(Error::Transport)?;
        debug!("{method} {url} finished with status {}", resp.status());

        let (parts, body) = resp.into_parts();
        decode_response(parts.status, body)
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, Error> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let uri: Uri = trimmed
        .parse()
        .map_err(|e| Error::Config(format!("invalid base url {base_url:?}: {e}")))?;

    if !matches!(uri.scheme_str(), Some("http") | Some("https")) {
        return Err(Error::Config(format!(
            "base url {base_url:?} must start with http:// or https://"
        )));
    }
    if uri.authority().is_none() {
        return Err(Error::Config(format!("base url {base_url:?} has no host")));
    }
    if uri.query().is_some() {
        return Err(Error::Config(format!(
            "base url {base_url:?} must not carry a query"
        )));
    }

    Ok(trimmed.to_string())
}

fn decode_response(status: StatusCode, body: Bytes) -> Result<Option<Value>, Error> {
    if !status.is_success() {
        return Err(Error::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|source| Error::MalformedResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })
}
