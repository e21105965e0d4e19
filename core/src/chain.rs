use crate::{Context, ErrorKind, ProvideCredential, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider returning `Ok(Some(_))` wins. Providers returning
/// `Ok(None)` or any other error are skipped. A [`ErrorKind::ConfigInvalid`]
/// error stops the chain and is returned as is.
pub struct ProvideCredentialChain<C> {
    providers: Vec<Box<dyn ProvideCredential<Credential = C>>>,
}

impl<C> ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the end of the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = C>) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a credential provider to the front of the chain.
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = C>) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<C> Default for ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ProvideCredentialChain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers", &self.providers)
            .finish()
    }
}

#[async_trait]
impl<C> ProvideCredential for ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            debug!("trying credential provider: {provider:?}");

            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    debug!("loaded credential from provider: {provider:?}");
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    debug!("no credential found in provider: {provider:?}");
                }
                Err(e) if e.kind() == ErrorKind::ConfigInvalid => {
                    warn!("credential provider {provider:?} is misconfigured: {e:?}");
                    return Err(e);
                }
                Err(e) => {
                    warn!("error loading credential from provider {provider:?}: {e:?}");
                }
            }
        }

        Ok(None)
    }
}
