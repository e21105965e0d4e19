use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential, SigningRequest};
use bytes::Bytes;
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the credential provider, dropping any cached credential.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = K>,
    ) -> Self {
        self.loader = Arc::new(provider);
        self.credential = Arc::new(Mutex::new(None));
        self
    }

    /// Replace the context.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// The context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Signing request.
    ///
    /// The credential is loaded on first use and cached until it becomes invalid.
    /// The input request is consumed and the signed request is returned.
    pub async fn sign(&self, req: http::Request<Bytes>) -> Result<http::Request<Bytes>> {
        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.loader.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        let req = SigningRequest::build(req)?;
        let req = self
            .builder
            .sign_request(&self.ctx, req, credential.as_ref())
            .await?;
        req.into_request()
    }
}
