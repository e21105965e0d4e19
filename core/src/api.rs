use crate::{Context, Result, SigningRequest};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(ctx) = self else {
            return false;
        };

        ctx.is_valid()
    }
}

/// ProvideCredential is the trait used by signer to load the credential from the environment.
///
/// The credential can come from static values, environment variables or an
/// `.edgerc` file; a provider returns `Ok(None)` when its source has nothing
/// to offer so that the next one in a chain can be tried.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load signing credential from current env.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait used by signer to sign the request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request and return it with the authentication headers attached.
    ///
    /// ## Credential
    ///
    /// The `credential` parameter is the credential required by the signer to sign the
    /// request. Implementations must fail instead of returning the request unsigned
    /// when it's `None` or invalid.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: SigningRequest,
        credential: Option<&Self::Credential>,
    ) -> Result<SigningRequest>;
}
