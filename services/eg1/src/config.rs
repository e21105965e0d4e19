use std::fmt::{Debug, Formatter};

use log::warn;

use edgegrid_core::utils::Redact;
use edgegrid_core::{Context, Error, Result};

use crate::constants::*;
use crate::edgerc::EdgercSection;
use crate::Credential;

/// Config carries all the configuration for EdgeGrid clients.
#[derive(Clone, Default)]
pub struct Config {
    /// `client_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_CLIENT_TOKEN`]
    /// - `client_token` in the `.edgerc` section
    pub client_token: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_ACCESS_TOKEN`]
    /// - `access_token` in the `.edgerc` section
    pub access_token: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_CLIENT_SECRET`]
    /// - `client_secret` in the `.edgerc` section
    pub client_secret: Option<String>,
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_BASEURL`]
    /// - `https://` + `host` in the `.edgerc` section
    pub base_url: Option<String>,
    /// `max_body` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_MAX_BODY`]
    /// - `max-body` in the `.edgerc` section
    /// - default to [`DEFAULT_MAX_BODY`]
    pub max_body: Option<usize>,
    /// Names of the headers covered by the signature, in signing order.
    ///
    /// - default to empty
    pub headers_to_sign: Vec<String>,
    /// `edgerc_path` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_EDGERC`]
    /// - default to `~/.edgerc`
    pub edgerc_path: Option<String>,
    /// `edgerc_section` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AKAMAI_EDGERC_SECTION`]
    /// - default to `default`
    pub edgerc_section: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_token", &self.client_token.as_ref().map(Redact::from))
            .field("access_token", &self.access_token.as_ref().map(Redact::from))
            .field("client_secret", &self.client_secret.as_ref().map(Redact::from))
            .field("base_url", &self.base_url)
            .field("max_body", &self.max_body)
            .field("headers_to_sign", &self.headers_to_sign)
            .field("edgerc_path", &self.edgerc_path)
            .field("edgerc_section", &self.edgerc_section)
            .finish()
    }
}

impl Config {
    /// Set the client token.
    pub fn with_client_token(mut self, v: impl Into<String>) -> Self {
        self.client_token = Some(v.into());
        self
    }

    /// Set the access token.
    pub fn with_access_token(mut self, v: impl Into<String>) -> Self {
        self.access_token = Some(v.into());
        self
    }

    /// Set the client secret.
    pub fn with_client_secret(mut self, v: impl Into<String>) -> Self {
        self.client_secret = Some(v.into());
        self
    }

    /// Set the base url, e.g. `https://akab-xxxx.luna.akamaiapis.net`.
    pub fn with_base_url(mut self, v: impl Into<String>) -> Self {
        self.base_url = Some(v.into());
        self
    }

    /// Set the maximum number of body bytes covered by the content hash.
    pub fn with_max_body(mut self, v: usize) -> Self {
        self.max_body = Some(v);
        self
    }

    /// Set the headers to sign.
    pub fn with_headers_to_sign<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers_to_sign = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the `.edgerc` path.
    pub fn with_edgerc_path(mut self, v: impl Into<String>) -> Self {
        self.edgerc_path = Some(v.into());
        self
    }

    /// Set the `.edgerc` section.
    pub fn with_edgerc_section(mut self, v: impl Into<String>) -> Self {
        self.edgerc_section = Some(v.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_TOKEN) {
            self.client_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_ACCESS_TOKEN) {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_CLIENT_SECRET) {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_BASEURL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_MAX_BODY) {
            match v.trim().parse::<usize>() {
                Ok(v) => {
                    self.max_body.get_or_insert(v);
                }
                Err(err) => warn!("ignoring invalid {AKAMAI_MAX_BODY} {v:?}: {err}"),
            }
        }
        if let Some(v) = ctx.env_var(AKAMAI_EDGERC) {
            self.edgerc_path.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AKAMAI_EDGERC_SECTION) {
            self.edgerc_section.get_or_insert(v);
        }

        self
    }

    /// Fill the missing fields from the configured `.edgerc` section.
    ///
    /// A missing file or section leaves the config untouched.
    pub async fn from_edgerc(mut self, ctx: &Context) -> Result<Self> {
        let Some(section) =
            EdgercSection::load(ctx, self.edgerc_path(), self.edgerc_section()).await?
        else {
            return Ok(self);
        };

        if let Some(v) = section.client_token {
            self.client_token.get_or_insert(v);
        }
        if let Some(v) = section.access_token {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = section.client_secret {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = section.host {
            self.base_url.get_or_insert_with(|| format!("https://{v}"));
        }
        if let Some(v) = section.max_body {
            self.max_body.get_or_insert(v);
        }

        Ok(self)
    }

    /// Path of the `.edgerc` file.
    pub fn edgerc_path(&self) -> &str {
        self.edgerc_path.as_deref().unwrap_or(DEFAULT_EDGERC_PATH)
    }

    /// Section of the `.edgerc` file.
    pub fn edgerc_section(&self) -> &str {
        self.edgerc_section
            .as_deref()
            .unwrap_or(DEFAULT_EDGERC_SECTION)
    }

    /// Maximum number of body bytes covered by the content hash.
    pub fn max_body(&self) -> usize {
        self.max_body.unwrap_or(DEFAULT_MAX_BODY)
    }

    /// Credential built from this config.
    ///
    /// Returns `Ok(None)` if none of the credential fields is set. Setting only
    /// some of them, or setting one to a blank value, is an error.
    pub fn credential(&self) -> Result<Option<Credential>> {
        match (&self.client_token, &self.access_token, &self.client_secret) {
            (None, None, None) => Ok(None),
            (Some(ct), Some(at), Some(cs)) => Credential::new(ct, at, cs).map(Some),
            (ct, at, _) => {
                let missing = if ct.is_none() {
                    "client_token"
                } else if at.is_none() {
                    "access_token"
                } else {
                    "client_secret"
                };
                Err(Error::credential_invalid(format!(
                    "{missing} is not set while other credential fields are"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::StaticEnv;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_context(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = env_context(&[
            (AKAMAI_CLIENT_TOKEN, "akab-client"),
            (AKAMAI_ACCESS_TOKEN, "akab-access"),
            (AKAMAI_CLIENT_SECRET, "s3cr3t"),
            (AKAMAI_BASEURL, "https://akab-host.luna.akamaiapis.net"),
            (AKAMAI_MAX_BODY, "2048"),
            (AKAMAI_EDGERC_SECTION, "ccu"),
        ]);

        let cfg = Config::default().from_env(&ctx);
        assert_eq!(cfg.client_token.as_deref(), Some("akab-client"));
        assert_eq!(cfg.access_token.as_deref(), Some("akab-access"));
        assert_eq!(cfg.client_secret.as_deref(), Some("s3cr3t"));
        assert_eq!(
            cfg.base_url.as_deref(),
            Some("https://akab-host.luna.akamaiapis.net")
        );
        assert_eq!(cfg.max_body(), 2048);
        assert_eq!(cfg.edgerc_path(), DEFAULT_EDGERC_PATH);
        assert_eq!(cfg.edgerc_section(), "ccu");
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = env_context(&[(AKAMAI_CLIENT_TOKEN, "from-env"), (AKAMAI_MAX_BODY, "many")]);

        let cfg = Config::default()
            .with_client_token("explicit")
            .from_env(&ctx);
        assert_eq!(cfg.client_token.as_deref(), Some("explicit"));
        assert_eq!(cfg.max_body(), DEFAULT_MAX_BODY);
    }

    #[test]
    fn test_credential() {
        assert!(Config::default().credential().unwrap().is_none());

        let cfg = Config::default()
            .with_client_token("akab-client")
            .with_access_token("akab-access");
        let err = cfg.credential().unwrap_err();
        assert!(err.is_credential_error());
        assert_eq!(
            err.to_string(),
            "client_secret is not set while other credential fields are"
        );

        let cred = cfg.with_client_secret("s3cr3t").credential().unwrap().unwrap();
        assert_eq!(cred.client_token, "akab-client");
        assert_eq!(cred.client_secret, "s3cr3t");

        let err = Config::default()
            .with_client_token("")
            .with_access_token("akab-access")
            .with_client_secret("s3cr3t")
            .credential()
            .unwrap_err();
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = Config::default()
            .with_client_token("akab-client-token-xxx")
            .with_client_secret("super-secret-value-123");

        let out = format!("{cfg:?}");
        assert!(!out.contains("super-secret-value-123"));
        assert!(out.contains("aka***xxx"));
    }

    #[tokio::test]
    async fn test_from_edgerc() -> Result<()> {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[ccu]\nclient_secret = s3cr3t\nhost = akab-host.luna.akamaiapis.net\naccess_token = akab-access\nclient_token = akab-client\nmax-body = 4096"
        )
        .unwrap();

        let ctx = Context::new().with_file_read(edgegrid_file_read_tokio::TokioFileRead);
        let cfg = Config::default()
            .with_client_token("explicit")
            .with_edgerc_path(file.path().to_string_lossy())
            .with_edgerc_section("ccu")
            .from_edgerc(&ctx)
            .await?;

        assert_eq!(cfg.client_token.as_deref(), Some("explicit"));
        assert_eq!(cfg.access_token.as_deref(), Some("akab-access"));
        assert_eq!(cfg.client_secret.as_deref(), Some("s3cr3t"));
        assert_eq!(
            cfg.base_url.as_deref(),
            Some("https://akab-host.luna.akamaiapis.net")
        );
        assert_eq!(cfg.max_body(), 4096);

        let cfg = Config::default()
            .with_edgerc_path("/definitely/not/here/.edgerc")
            .from_edgerc(&ctx)
            .await?;
        assert!(cfg.credential()?.is_none());
        Ok(())
    }
}
