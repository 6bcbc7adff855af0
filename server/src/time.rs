//! Time source abstraction for credential expiry.
//!
//! Token issuance stamps `iat`/`exp` and verification compares `exp` against
//! "now". Both read the clock through [`TimeSource`] so that production uses
//! the system clock while tests move time explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over the wall clock.
pub trait TimeSource: Send + Sync {
    /// Get the current time in whole seconds since Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Real time source using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> u64 {
        // duration_since(UNIX_EPOCH) only fails if system time is before 1970,
        // in which case every token reads as already expired.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_secs())
    }
}

/// A manually driven time source.
///
/// Time only advances when told to, which makes expiry behavior
/// deterministic. Backed by an atomic so it can be shared with the server
/// state across threads.
///
/// # Example
///
/// ```
/// use anime_catalog::time::{ManualTimeSource, TimeSource};
///
/// let time = ManualTimeSource::new(1000);
/// assert_eq!(time.now_secs(), 1000);
///
/// time.advance(100);
/// assert_eq!(time.now_secs(), 1100);
///
/// time.set(5000);
/// assert_eq!(time.now_secs(), 5000);
/// ```
#[derive(Debug)]
pub struct ManualTimeSource {
    /// Current time in seconds since Unix epoch.
    current_secs: AtomicU64,
}

impl ManualTimeSource {
    /// Create a time source frozen at `initial_secs`.
    #[must_use]
    pub const fn new(initial_secs: u64) -> Self {
        Self {
            current_secs: AtomicU64::new(initial_secs),
        }
    }

    /// Create a time source starting at `1_700_000_000` (November 2023).
    #[must_use]
    pub const fn default_start() -> Self {
        Self::new(1_700_000_000)
    }

    /// Advance time by `secs`, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        // fetch_update only fails when the closure returns None, which it never does.
        let _ = self
            .current_secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(secs))
            });
    }

    /// Set the current time. May move time backwards.
    pub fn set(&self, secs: u64) {
        self.current_secs.store(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_secs(&self) -> u64 {
        self.current_secs.load(Ordering::SeqCst)
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::default_start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let source = SystemTimeSource;
        let t1 = source.now_secs();
        let t2 = source.now_secs();

        // Time should be reasonable (after 2020)
        assert!(t1 > 1_577_836_800);

        // Time should not go backwards
        assert!(t2 >= t1);
    }

    #[test]
    fn test_manual_time_advance() {
        let time = ManualTimeSource::new(1000);

        time.advance(100);
        assert_eq!(time.now_secs(), 1100);

        time.advance(50);
        assert_eq!(time.now_secs(), 1150);
    }

    #[test]
    fn test_manual_time_set_can_go_backwards() {
        let time = ManualTimeSource::new(1000);

        time.set(5000);
        assert_eq!(time.now_secs(), 5000);

        time.set(3000);
        assert_eq!(time.now_secs(), 3000);
    }

    #[test]
    fn test_manual_time_advance_saturates() {
        let time = ManualTimeSource::new(u64::MAX - 10);
        time.advance(100);
        assert_eq!(time.now_secs(), u64::MAX);
    }

    #[test]
    fn test_manual_time_default() {
        assert_eq!(ManualTimeSource::default().now_secs(), 1_700_000_000);
    }
}
