//! Akamai EdgeGrid `EG1-HMAC-SHA256` signing implementation.
//!
//! Every EdgeGrid API call carries an `Authorization` header computed from a
//! client token, an access token and a client secret. This crate builds that
//! header: it hashes the body, assembles the tab separated canonical request,
//! derives a per timestamp signing key and signs the canonical request with it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bytes::Bytes;
//! use edgegrid_core::{Context, OsEnv, Signer};
//! use edgegrid_eg1::{DefaultCredentialProvider, RequestSigner};
//! use edgegrid_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() -> edgegrid_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//!     let req = http::Request::get("https://akab-xxxx.luna.akamaiapis.net/ccu/v2/queues/default")
//!         .body(Bytes::new())?;
//!     let req = signer.sign(req).await?;
//!     println!("{:?}", req.headers().get(http::header::AUTHORIZATION));
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export AKAMAI_CLIENT_TOKEN=akab-client-token-xxx
//! export AKAMAI_ACCESS_TOKEN=akab-access-token-xxx
//! export AKAMAI_CLIENT_SECRET=xxxx
//! ```
//!
//! ### `.edgerc`
//!
//! The `default` section of `~/.edgerc` is used unless `AKAMAI_EDGERC` or
//! `AKAMAI_EDGERC_SECTION` point somewhere else.

mod constants;
pub use constants::{DEFAULT_MAX_BODY, EG1_HMAC_SHA256};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod clock;
pub use clock::{FixedClock, SigningClock, SigningContext, SystemClock};

mod canonical;
pub use canonical::{canonical_request, canonicalize_headers, content_hash, CANONICAL_REQUEST_FIELDS};

mod key;
pub use key::{sign, signing_key};

mod auth_header;
pub use auth_header::{final_auth_header, partial_auth_header};

mod edgerc;
pub use edgerc::{load_edgerc, EdgercSection};

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;
