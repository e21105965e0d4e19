use std::sync::Arc;

use async_trait::async_trait;
use http::header::{HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE, EXPECT};
use http::HeaderValue;
use log::debug;

use edgegrid_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::auth_header::{final_auth_header, partial_auth_header};
use crate::canonical::{canonical_request, content_hash};
use crate::clock::{SigningClock, SigningContext, SystemClock};
use crate::constants::DEFAULT_MAX_BODY;
use crate::key::{sign, signing_key};
use crate::{Config, Credential};

/// RequestSigner that implements EG1-HMAC-SHA256.
///
/// - [Authenticate with EdgeGrid](https://techdocs.akamai.com/developer/docs/authenticate-with-edgegrid)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    headers_to_sign: Vec<HeaderName>,
    max_body: usize,
    clock: Arc<dyn SigningClock>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a new signer that signs no extra headers.
    pub fn new() -> Self {
        Self {
            headers_to_sign: Vec::new(),
            max_body: DEFAULT_MAX_BODY,
            clock: Arc::new(SystemClock),
        }
    }

    /// Build a signer from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let headers_to_sign = cfg
            .headers_to_sign
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
                    Error::config_invalid(format!("invalid header to sign: {name:?}"))
                        .with_source(e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new()
            .with_headers_to_sign(headers_to_sign)
            .with_max_body(cfg.max_body()))
    }

    /// Set the headers covered by the signature, in signing order.
    pub fn with_headers_to_sign(mut self, headers: impl IntoIterator<Item = HeaderName>) -> Self {
        self.headers_to_sign = headers.into_iter().collect();
        self
    }

    /// Set the maximum number of body bytes covered by the content hash.
    pub fn with_max_body(mut self, max_body: usize) -> Self {
        self.max_body = max_body;
        self
    }

    /// Specify the timestamp and nonce source.
    ///
    /// # Note
    ///
    /// We should always take current time and a fresh nonce to sign requests.
    /// Only use a fixed clock for testing.
    pub fn with_clock(mut self, clock: impl SigningClock) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        mut req: SigningRequest,
        credential: Option<&Self::Credential>,
    ) -> Result<SigningRequest> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "credential is required to sign edgegrid requests",
            ));
        };
        cred.check()?;

        let sctx = SigningContext::new(self.clock.as_ref());

        req.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        let hash = content_hash(&req, self.max_body);
        let partial = partial_auth_header(cred, &sctx.timestamp, &sctx.nonce);
        let creq = canonical_request(&req, &self.headers_to_sign, &hash, &partial)?;

        let key = signing_key(&cred.client_secret, &sctx.timestamp);
        let signature = sign(&key, &creq);
        debug!(
            "signed {} {} at {}",
            req.method,
            req.resource(),
            sctx.timestamp
        );

        let mut authorization = HeaderValue::from_str(&final_auth_header(&partial, &signature))
            .map_err(|e| {
                Error::unexpected("failed to create authorization header").with_source(e)
            })?;
        authorization.set_sensitive(true);

        req.headers.insert(AUTHORIZATION, authorization);
        req.headers.insert(EXPECT, HeaderValue::from_static(""));

        Ok(req)
    }
}
