// src/config.rs

//! Configuration types for the leaky limiter

// dependencies
use crate::errors::LeakyLimiterError;

/// Boost applied to the nominal rate for sub-second releases.
pub const DEFAULT_BOOST: f64 = 1.1;

/// How queued work is handed back by `take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// Work is a divisible unit count; any amount may be released.
    #[default]
    Stream,
    /// Work arrives as indivisible blocks released whole, in FIFO order.
    Blocks,
}

/// Configuration for limiter behavior
#[derive(Debug, Clone)]
pub struct LeakyLimiterConfig {
    pub(crate) limit: u64,
    pub(crate) mode: ReleaseMode,
    pub(crate) boost: f64,
}

impl LeakyLimiterConfig {
    /// Create a new streaming configuration with the given units per second.
    /// A limit of zero is treated as one.
    pub fn new(limit: u64) -> Self {
        Self {
            limit: coerce_limit(limit),
            mode: ReleaseMode::Stream,
            boost: DEFAULT_BOOST,
        }
    }

    /// Builder-style: set the limit in units per second
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = coerce_limit(limit);
        self
    }

    /// Builder-style: set the release mode
    pub fn mode(mut self, mode: ReleaseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style: release whole blocks instead of divisible units
    pub fn block_mode(self) -> Self {
        self.mode(ReleaseMode::Blocks)
    }

    /// Builder-style: set the boost factor for sub-second releases
    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LeakyLimiterError> {
        if !self.boost.is_finite() || self.boost < 1.0 {
            return Err(LeakyLimiterError::InvalidBoost);
        }
        Ok(())
    }
}

impl Default for LeakyLimiterConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

pub(crate) fn coerce_limit(limit: u64) -> u64 {
    limit.max(1)
}
