//! # Temporal Types — UTC Timestamps and Injectable Clocks
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds, and the
//! `Clock` abstraction through which every deadline comparison reads the
//! current time.
//!
//! Non-UTC inputs are **rejected** by [`Timestamp::parse()`]. There is no
//! silent offset conversion on that path.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DiplError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Serializes as RFC 3339 with a `Z` suffix (`2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    ///
    /// Engine code never calls this directly; it reads time through a
    /// [`Clock`]. Only [`SystemClock`] does.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`DiplError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or uses a non-`Z` offset (including `+00:00`).
    pub fn parse(s: &str) -> Result<Self, DiplError> {
        if !s.ends_with('Z') {
            return Err(DiplError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| DiplError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, DiplError> {
        DateTime::from_timestamp(secs, 0).map(Self).ok_or_else(|| {
            DiplError::InvalidTimestamp(format!("unix timestamp out of range: {secs}"))
        })
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// This timestamp shifted forward by whole days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// This timestamp shifted forward (or back, if negative) by whole hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Fractional hours from `self` until `later`. Negative if `later` is
    /// in the past relative to `self`.
    pub fn hours_until(&self, later: Timestamp) -> f64 {
        (later.epoch_secs() - self.epoch_secs()) as f64 / 3600.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ─── Clocks ──────────────────────────────────────────────────────────

/// Source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// A clock shared between the factory, scorer, and controller.
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock pinned to a settable instant.
///
/// Interior-mutable so one `Arc<FixedClock>` can be handed to the engine
/// while the test keeps a handle to advance it.
#[derive(Debug)]
pub struct FixedClock {
    epoch_secs: AtomicI64,
}

impl FixedClock {
    /// A clock pinned at `at`.
    pub fn new(at: Timestamp) -> Self {
        Self {
            epoch_secs: AtomicI64::new(at.epoch_secs()),
        }
    }

    /// Move the clock to `at`.
    pub fn set(&self, at: Timestamp) {
        self.epoch_secs.store(at.epoch_secs(), Ordering::SeqCst);
    }

    /// Advance the clock by whole hours.
    pub fn advance_hours(&self, hours: i64) {
        self.epoch_secs.fetch_add(hours * 3600, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let secs = self.epoch_secs.load(Ordering::SeqCst);
        // Stored values always come from a valid Timestamp.
        Timestamp::from_epoch_secs(secs).unwrap_or_else(|_| Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
        assert!(Timestamp::parse("not-a-date").is_err());
    }

    #[test]
    fn test_plus_days_and_hours() {
        let base = ts("2026-03-01T00:00:00Z");
        assert_eq!(base.plus_days(14).to_iso8601(), "2026-03-15T00:00:00Z");
        assert_eq!(base.plus_hours(-1).to_iso8601(), "2026-02-28T23:00:00Z");
    }

    #[test]
    fn test_hours_until() {
        let base = ts("2026-03-01T00:00:00Z");
        assert_eq!(base.hours_until(base.plus_hours(12)), 12.0);
        assert_eq!(base.hours_until(base.plus_hours(-6)), -6.0);
        assert_eq!(base.hours_until(ts("2026-03-01T00:30:00Z")), 0.5);
    }

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(ts("2026-03-01T00:00:00Z"));
        assert_eq!(clock.now(), ts("2026-03-01T00:00:00Z"));
        clock.advance_hours(25);
        assert_eq!(clock.now(), ts("2026-03-02T01:00:00Z"));
        clock.set(ts("2027-01-01T00:00:00Z"));
        assert_eq!(clock.now().to_iso8601(), "2027-01-01T00:00:00Z");
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = ts("2026-01-15T12:00:00Z");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2026-01-15T12:00:00Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
