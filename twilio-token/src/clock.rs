//! Time sources used to stamp issued-at and expiration claims.
//!
//! Builders default to [`SystemClock`]. Tests swap in a [`FixedClock`] (or any
//! `Fn() -> DateTime<Utc>`) through the builders' `clock` setter so that the
//! produced claims are deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Freeze the clock at a Unix timestamp in seconds.
    ///
    /// Timestamps outside chrono's representable range fall back to the epoch.
    pub fn from_timestamp(secs: i64) -> Self {
        let at = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_default();
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Unix seconds at which a token issued at `now` with `ttl` expires.
pub(crate) fn expires_at(now: DateTime<Utc>, ttl: Duration) -> i64 {
    now.timestamp().saturating_add(ttl.num_seconds())
}
