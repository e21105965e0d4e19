use edgegrid_eg1::{Credential, DefaultCredentialProvider, RequestSigner};
use edgegrid_file_read_tokio::TokioFileRead;
use edgegrid_http_send_reqwest::ReqwestHttpSend;

use crate::ccu::{self, PurgeClient};
use crate::{Context, OsEnv, Signer};

/// Create a context with the tokio file reader, the reqwest transport and
/// the OS environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Create a default EdgeGrid signer.
///
/// This function creates a signer with:
/// - Default context (see [`default_context`])
/// - Default credential provider (env vars, then `~/.edgerc`)
/// - Request signer without extra signed headers
///
/// Use [`Signer::with_credential_provider`] to plug in other credentials.
pub fn default_signer() -> Signer<Credential> {
    Signer::new(
        default_context(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    )
}

/// Create a purge client for `base_url` with [`default_signer`].
pub fn default_purge_client(base_url: &str) -> Result<PurgeClient, ccu::Error> {
    PurgeClient::new(default_signer(), base_url)
}
