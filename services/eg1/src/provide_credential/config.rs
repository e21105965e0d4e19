use crate::{Config, Credential};
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider takes the credential fields set on a [`Config`].
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { config: cfg }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        self.config.credential()
    }
}
