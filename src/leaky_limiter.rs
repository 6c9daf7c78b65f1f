// src/leaky_limiter.rs

// leaky-limiter: a leaky-bucket rate limiter for streams of chunks.

// dependencies
use crate::blocks::BlockQueue;
use crate::clock::{Clock, SystemClock};
use crate::config::{LeakyLimiterConfig, ReleaseMode, coerce_limit};
use crate::errors::LeakyLimiterError;
use crate::stream::StreamBucket;
use crate::window::SlidingWindow;
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// The main LeakyLimiter model.
/// C is the clock type, defaulting to SystemClock.
/// All mutable state sits behind a single mutex; no call ever blocks past
/// the lock or sleeps, `take` only reports how long the caller should wait.
#[derive(Debug)]
pub struct LeakyLimiter<C = SystemClock>
where
    C: Clock,
{
    state: Mutex<LimiterState>,
    clock: C,
}

#[derive(Debug)]
struct LimiterState {
    limit: u64,
    boost: f64,
    boosted_rate: f64,
    window: SlidingWindow,
    pending: Pending,
}

// the release mode is fixed when the limiter is built
#[derive(Debug)]
enum Pending {
    Stream(StreamBucket),
    Blocks(BlockQueue),
}

impl LeakyLimiter<SystemClock> {
    /// Create a streaming limiter on the wall clock.
    pub fn new(limit: u64) -> Self {
        Self::with_clock(limit, SystemClock)
    }
}

// methods for the LeakyLimiter type
impl<C> LeakyLimiter<C>
where
    C: Clock,
{
    /// Create a streaming limiter with the default boost on the given clock.
    pub fn with_clock(limit: u64, clock: C) -> Self {
        Self::build(LeakyLimiterConfig::new(limit), clock)
    }

    // method to create a new limiter from a config object
    pub fn with_config(config: LeakyLimiterConfig, clock: C) -> Result<Self, LeakyLimiterError> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: LeakyLimiterConfig, clock: C) -> Self {
        let pending = match config.mode {
            ReleaseMode::Stream => Pending::Stream(StreamBucket::new()),
            ReleaseMode::Blocks => Pending::Blocks(BlockQueue::new()),
        };
        let limit = coerce_limit(config.limit);

        Self {
            state: Mutex::new(LimiterState {
                limit,
                boost: config.boost,
                boosted_rate: limit as f64 * config.boost,
                window: SlidingWindow::new(),
                pending,
            }),
            clock,
        }
    }

    /// Queue a chunk of work. In block mode the chunk becomes one
    /// indivisible block.
    pub fn add(&self, chunk_size: u64) {
        let mut state = self.state.lock();
        match &mut state.pending {
            Pending::Stream(bucket) => bucket.add(chunk_size),
            Pending::Blocks(queue) => queue.add(chunk_size),
        }
    }

    /// Ask how much work may be processed now.
    ///
    /// `(0, 0)` means there is nothing to do, `(0, wait)` means ask again
    /// after `wait`, and `(n, 0)` means `n` units are ready.
    pub fn take(&self) -> Result<TakeDecision, LeakyLimiterError> {
        let mut state = self.state.lock();
        let now = self
            .clock
            .now()
            .inspect_err(|e| warn!(error = %e, "clock read failed"))?;

        let LimiterState {
            limit,
            boosted_rate,
            window,
            pending,
            ..
        } = &mut *state;

        let decision = match pending {
            Pending::Stream(bucket) => bucket.take(now, *limit, *boosted_rate, window),
            Pending::Blocks(queue) => queue.take(now, *limit, window),
        };

        if decision.is_ready() {
            trace!(released = decision.released, now, "released");
        } else if decision.is_throttled() {
            debug!(wait_nanos = decision.wait.as_nanos() as u64, now, "throttled");
        }

        Ok(decision)
    }

    // accessor method to return the limit in units per second
    pub fn limit(&self) -> u64 {
        self.state.lock().limit
    }

    /// Replace the limit, returning the previous one. Zero is treated as one.
    /// Releases already in the window keep counting against the new limit.
    pub fn set_limit(&self, limit: u64) -> u64 {
        let limit = coerce_limit(limit);
        let mut state = self.state.lock();
        let previous = std::mem::replace(&mut state.limit, limit);
        state.boosted_rate = limit as f64 * state.boost;
        debug!(previous, limit, "limit changed");
        previous
    }

    /// Units queued but not yet released (sum of block sizes in block mode).
    pub fn bucket_size(&self) -> u64 {
        match &self.state.lock().pending {
            Pending::Stream(bucket) => bucket.size(),
            Pending::Blocks(queue) => queue.pending_units(),
        }
    }

    /// Number of whole blocks waiting; always zero in streaming mode.
    pub fn pending_blocks(&self) -> usize {
        match &self.state.lock().pending {
            Pending::Stream(_) => 0,
            Pending::Blocks(queue) => queue.len(),
        }
    }

    /// Release mode chosen at construction.
    pub fn mode(&self) -> ReleaseMode {
        match &self.state.lock().pending {
            Pending::Stream(_) => ReleaseMode::Stream,
            Pending::Blocks(_) => ReleaseMode::Blocks,
        }
    }

    // accessor method to return the boost factor
    pub fn boost(&self) -> f64 {
        self.state.lock().boost
    }
}

/// Outcome of a `take` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeDecision {
    /// Units the caller may process now
    pub released: u64,
    /// How long to wait before calling `take` again (zero unless throttled)
    pub wait: Duration,
}

impl TakeDecision {
    pub(crate) fn idle() -> Self {
        Self {
            released: 0,
            wait: Duration::ZERO,
        }
    }

    pub(crate) fn ready(released: u64) -> Self {
        Self {
            released,
            wait: Duration::ZERO,
        }
    }

    pub(crate) fn throttled(wait: Duration) -> Self {
        Self { released: 0, wait }
    }

    /// Nothing queued and nothing owed.
    pub fn is_idle(&self) -> bool {
        self.released == 0 && self.wait.is_zero()
    }

    /// Units are ready to process now.
    pub fn is_ready(&self) -> bool {
        self.released > 0
    }

    /// Work is pending but the caller has to wait for `wait` first.
    pub fn is_throttled(&self) -> bool {
        self.released == 0 && !self.wait.is_zero()
    }
}
