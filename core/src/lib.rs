//! Core components for signing Akamai EdgeGrid API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! EdgeGrid signer and the API clients built on top of it.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: The main orchestrator that coordinates credential loading and request signing
//!
//! ## Example
//!
//! ```no_run
//! use edgegrid_core::{Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential, SigningRequest};
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         mut req: SigningRequest,
//!         cred: Option<&Self::Credential>,
//!     ) -> Result<SigningRequest> {
//!         let cred = cred.ok_or_else(|| edgegrid_core::Error::credential_invalid("missing credential"))?;
//!         req.headers.insert(http::header::AUTHORIZATION, format!("Token {}", cred.token).parse()?);
//!         Ok(req)
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyLoader, MySigner);
//!
//! let req = http::Request::get("https://example.com").body(Bytes::new())?;
//! let req = signer.sign(req).await?;
//! assert!(req.headers().contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
