//! Timestamp and nonce sources.

use std::fmt::Debug;

use edgegrid_core::time::{format_edgegrid_timestamp, now, DateTime};
use uuid::Uuid;

/// SigningClock supplies the per request timestamp and nonce.
///
/// The signer never reads global time or randomness directly, tests inject a
/// [`FixedClock`] to get deterministic signatures.
pub trait SigningClock: Debug + Send + Sync + 'static {
    /// Current UTC time formatted as EdgeGrid timestamp, e.g. `20240115T10:30:00+0000`.
    fn timestamp(&self) -> String;

    /// A value unique per call.
    fn nonce(&self) -> String;
}

/// SystemClock reads the wall clock and generates random v4 uuids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SigningClock for SystemClock {
    fn timestamp(&self) -> String {
        format_edgegrid_timestamp(now())
    }

    fn nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// FixedClock always returns the same timestamp and nonce.
///
/// # Note
///
/// A nonce must never be reused against a real endpoint, only use this for testing.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime,
    nonce: String,
}

impl FixedClock {
    /// Create a new FixedClock.
    pub fn new(time: DateTime, nonce: impl Into<String>) -> Self {
        Self {
            time,
            nonce: nonce.into(),
        }
    }
}

impl SigningClock for FixedClock {
    fn timestamp(&self) -> String {
        format_edgegrid_timestamp(self.time)
    }

    fn nonce(&self) -> String {
        self.nonce.clone()
    }
}

/// Timestamp and nonce drawn for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// EdgeGrid timestamp.
    pub timestamp: String,
    /// Unique nonce.
    pub nonce: String,
}

impl SigningContext {
    /// Draw a fresh context from the clock.
    pub fn new(clock: &dyn SigningClock) -> Self {
        Self {
            timestamp: clock.timestamp(),
            nonce: clock.nonce(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_system_clock_nonce_is_unique() {
        let clock = SystemClock;
        let a = SigningContext::new(&clock);
        let b = SigningContext::new(&clock);

        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.nonce.len(), 36);
        assert_eq!(a.timestamp.len(), "20240115T10:30:00+0000".len());
        assert!(a.timestamp.ends_with("+0000"));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            "nonce-xyz",
        );

        assert_eq!(
            SigningContext::new(&clock),
            SigningContext {
                timestamp: "20240115T10:30:00+0000".to_string(),
                nonce: "nonce-xyz".to_string(),
            }
        );
    }
}
