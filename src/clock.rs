// src/clock.rs

// clock module definition and implementations

// dependencies
use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Nanoseconds in one second, the width of the accounting window.
pub(crate) const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current time in nanoseconds as a u64.
/// The limiter queries the clock once per `take` call and treats the reading
/// as instantaneous for the rest of that call.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Clock error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    SystemTimeError,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClockError::SystemTimeError => write!(f, "system time is before the Unix epoch"),
        }
    }
}

impl std::error::Error for ClockError {}

/// SystemClock implementation using the wall clock.
/// Returns the current time in nanoseconds since the Unix epoch.
/// This is the default clock used by the limiter.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .map_err(|_| ClockError::SystemTimeError)
    }
}

/// Monotonic clock measuring nanoseconds since its own construction.
///
/// Unlike [`SystemClock`] it never steps backwards when the wall clock is
/// adjusted, so it never fails.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Result<u64, ClockError> {
        Ok(self.epoch.elapsed().as_nanos() as u64)
    }
}
