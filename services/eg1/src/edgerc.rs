//! `.edgerc` file support.
//!
//! ```ini
//! [default]
//! client_secret = xxxx
//! host = akab-xxxx.luna.akamaiapis.net
//! access_token = akab-xxxx
//! client_token = akab-xxxx
//! max-body = 131072
//! ```

use ini::Ini;
use log::debug;

use edgegrid_core::{Context, Error, Result};

use crate::constants::*;

/// A single section of an `.edgerc` file.
#[derive(Debug, Clone, Default)]
pub struct EdgercSection {
    /// `client_token`
    pub client_token: Option<String>,
    /// `access_token`
    pub access_token: Option<String>,
    /// `client_secret`
    pub client_secret: Option<String>,
    /// `host`, without scheme.
    pub host: Option<String>,
    /// `max-body`
    pub max_body: Option<usize>,
}

impl EdgercSection {
    /// Parse the named section out of `.edgerc` content.
    ///
    /// Returns `Ok(None)` if the section doesn't exist.
    pub fn parse(content: &str, section: &str) -> Result<Option<Self>> {
        let conf = Ini::load_from_str(content).map_err(|e| {
            Error::config_invalid("failed to parse edgerc file").with_source(e)
        })?;

        let Some(props) = conf.section(Some(section)) else {
            return Ok(None);
        };

        let max_body = match props.get(EDGERC_MAX_BODY) {
            Some(v) => Some(v.trim().parse::<usize>().map_err(|e| {
                Error::config_invalid(format!("invalid {EDGERC_MAX_BODY} in section {section}"))
                    .with_source(e)
            })?),
            None => None,
        };

        let get = |key: &str| {
            props
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Some(Self {
            client_token: get(EDGERC_CLIENT_TOKEN),
            access_token: get(EDGERC_ACCESS_TOKEN),
            client_secret: get(EDGERC_CLIENT_SECRET),
            host: get(EDGERC_HOST),
            max_body,
        }))
    }

    /// Load a section from an `.edgerc` file.
    ///
    /// A missing file or section yields `Ok(None)`, a malformed file is an error.
    pub async fn load(ctx: &Context, path: &str, section: &str) -> Result<Option<Self>> {
        let Some(expanded) = ctx.expand_home_dir(path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&expanded).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read edgerc file {expanded}: {err:?}");
                return Ok(None);
            }
        };

        let parsed = Self::parse(&content, section)?;
        if parsed.is_none() {
            debug!("section {section} not found in edgerc file {expanded}");
        }
        Ok(parsed)
    }
}

/// Load `section` from the `.edgerc` file at `path`.
pub async fn load_edgerc(ctx: &Context, path: &str, section: &str) -> Result<Option<EdgercSection>> {
    EdgercSection::load(ctx, path, section).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGERC: &str = r#"
[default]
client_secret = s3cr3t
host = akab-host.luna.akamaiapis.net
access_token = akab-access
client_token = akab-client
max-body = 65536

[ccu]
client_secret = other-secret
host = akab-ccu.luna.akamaiapis.net
access_token = akab-ccu-access
client_token = akab-ccu-client
"#;

    #[test]
    fn test_parse_default_section() {
        let section = EdgercSection::parse(EDGERC, "default").unwrap().unwrap();

        assert_eq!(section.client_token.as_deref(), Some("akab-client"));
        assert_eq!(section.access_token.as_deref(), Some("akab-access"));
        assert_eq!(section.client_secret.as_deref(), Some("s3cr3t"));
        assert_eq!(section.host.as_deref(), Some("akab-host.luna.akamaiapis.net"));
        assert_eq!(section.max_body, Some(65536));
    }

    #[test]
    fn test_parse_named_section() {
        let section = EdgercSection::parse(EDGERC, "ccu").unwrap().unwrap();

        assert_eq!(section.client_token.as_deref(), Some("akab-ccu-client"));
        assert_eq!(section.max_body, None);
    }

    #[test]
    fn test_parse_missing_section() {
        assert!(EdgercSection::parse(EDGERC, "papi").unwrap().is_none());
    }

    #[test]
    fn test_parse_invalid_max_body() {
        let err = EdgercSection::parse("[default]\nmax-body = lots\n", "default").unwrap_err();
        assert_eq!(err.kind(), edgegrid_core::ErrorKind::ConfigInvalid);
    }
}
