use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static EdgeGrid credentials.
///
/// This provider is used when you have the client token, access token and
/// client secret directly and want to use them without any dynamic loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(client_token: &str, access_token: &str, client_secret: &str) -> Self {
        Self {
            credential: Credential {
                client_token: client_token.to_string(),
                access_token: access_token.to_string(),
                client_secret: client_secret.to_string(),
            },
        }
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        self.credential.check()?;
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new();

        let provider = StaticCredentialProvider::new("akab-client", "akab-access", "s3cr3t");
        let cred = provider.provide_credential(&ctx).await?.unwrap();
        assert_eq!(cred.client_token, "akab-client");
        assert_eq!(cred.access_token, "akab-access");
        assert_eq!(cred.client_secret, "s3cr3t");

        let provider = StaticCredentialProvider::new("akab-client", "", "s3cr3t");
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert!(err.is_credential_error());

        Ok(())
    }
}
