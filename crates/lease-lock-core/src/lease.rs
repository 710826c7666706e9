//! Lease timestamps.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Lease used when the requested duration is below [`MIN_LEASE`].
pub const DEFAULT_LEASE: Duration = Duration::from_secs(1);

/// Shortest lease duration honoured as requested.
pub const MIN_LEASE: Duration = Duration::from_millis(1);

/// The instant a lock's current hold expires, in nanoseconds since the Unix
/// epoch.
///
/// This is the value written to the store for a held key. It is a
/// comparison-only watermark: anyone who reads it can compute a newer one,
/// so it says nothing about *who* holds the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lease(i64);

impl Lease {
    /// Wraps a raw nanosecond timestamp.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Returns the raw nanosecond timestamp.
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    /// The current wall-clock time as a lease value.
    pub fn now() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(i64::try_from(nanos).unwrap_or(i64::MAX))
    }

    /// A lease expiring `duration` from now.
    ///
    /// Durations under one millisecond count as unset and yield
    /// [`DEFAULT_LEASE`] instead.
    pub fn expiring_in(duration: Duration) -> Self {
        Self::now().plus(effective_duration(duration))
    }

    /// Adds `duration` to this timestamp, saturating at the representable
    /// maximum.
    pub fn plus(self, duration: Duration) -> Self {
        let nanos = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(nanos))
    }

    /// Whether this lease lies strictly before `now`.
    pub fn is_expired_at(&self, now: Lease) -> bool {
        self.0 < now.0
    }

    /// Whether this lease lies strictly before the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Self::now())
    }
}

impl fmt::Display for Lease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Lease {
    fn from(nanos: i64) -> Self {
        Self(nanos)
    }
}

impl From<Lease> for i64 {
    fn from(lease: Lease) -> Self {
        lease.0
    }
}

/// Applies the sub-millisecond clamp to a requested lease duration.
pub fn effective_duration(requested: Duration) -> Duration {
    if requested < MIN_LEASE {
        DEFAULT_LEASE
    } else {
        requested
    }
}
