use crate::constants::*;
use crate::edgerc::load_edgerc;
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};
use log::debug;

/// EdgercCredentialProvider loads credentials from an `.edgerc` file.
///
/// The path and section are resolved from
///
/// - the value set on this provider
/// - env value: [`AKAMAI_EDGERC`] / [`AKAMAI_EDGERC_SECTION`]
/// - default to `~/.edgerc` / `default`
#[derive(Debug, Default, Clone)]
pub struct EdgercCredentialProvider {
    path: Option<String>,
    section: Option<String>,
}

impl EdgercCredentialProvider {
    /// Create a new EdgercCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `.edgerc` path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `.edgerc` section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for EdgercCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self
            .path
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC))
            .unwrap_or_else(|| DEFAULT_EDGERC_PATH.to_string());
        let section = self
            .section
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC_SECTION))
            .unwrap_or_else(|| DEFAULT_EDGERC_SECTION.to_string());

        let Some(sec) = load_edgerc(ctx, &path, &section).await? else {
            return Ok(None);
        };

        match (sec.client_token, sec.access_token, sec.client_secret) {
            (Some(ct), Some(at), Some(cs)) => Credential::new(ct, at, cs).map(Some),
            _ => {
                debug!("section {section} in {path} has incomplete credential");
                Ok(None)
            }
        }
    }
}
