//! Sign Akamai EdgeGrid API requests and talk to the CCU v2 purge API.
//!
//! ```no_run
//! # async fn example() -> Result<(), edgegrid::ccu::Error> {
//! use edgegrid::ccu::PurgeRequest;
//!
//! let client = edgegrid::default_purge_client("https://akab-xxxx.luna.akamaiapis.net")?;
//!
//! let resp = client
//!     .purge_request(&PurgeRequest::new(["https://www.example.com/index.html"]))
//!     .await?;
//! println!("purge accepted: {resp:?}");
//! # Ok(())
//! # }
//! ```
//!
//! Credentials come from `AKAMAI_CLIENT_TOKEN`, `AKAMAI_ACCESS_TOKEN` and
//! `AKAMAI_CLIENT_SECRET`, falling back to `~/.edgerc`.

pub use edgegrid_core::*;

/// EG1-HMAC-SHA256 signing.
pub mod eg1 {
    pub use edgegrid_eg1::*;
}

pub mod ccu;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_purge_client, default_signer};
