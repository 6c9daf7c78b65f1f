// src/lib.rs

//! # Leaky Limiter
//!
//! A leaky-bucket rate limiter for streams of variably sized chunks (bytes,
//! messages, packets). Producers `add` work as it arrives; a consumer calls
//! `take` in a loop to learn how many units it may process now, or how long
//! to wait before asking again.
//!
//! Releases are capped by a sliding one-second window. Sub-second calls may
//! draw on a boosted rate (1.1x by default) so that frequent callers still
//! reach the nominal rate. In block mode chunks are never split: each is
//! released whole, and an oversized block delays the next release instead.
//!
//! ## Quick Example
//!
//! ```rust
//! use leaky_limiter::LeakyLimiter;
//!
//! let limiter = LeakyLimiter::new(1024);
//! limiter.add(4096);
//!
//! let decision = limiter.take().unwrap();
//! if decision.is_ready() {
//!     println!("send {} bytes", decision.released);
//! } else if decision.is_throttled() {
//!     println!("retry in {:?}", decision.wait);
//! }
//! ```
//!
//! ## Block Mode
//!
//! ```rust
//! use leaky_limiter::{LeakyLimiter, LeakyLimiterConfig, SystemClock};
//!
//! let config = LeakyLimiterConfig::new(100).block_mode();
//! let limiter = LeakyLimiter::with_config(config, SystemClock).unwrap();
//! limiter.add(200);
//!
//! // the block is handed back whole even though it exceeds the limit
//! assert_eq!(limiter.take().unwrap().released, 200);
//! ```

// private modules
mod blocks;
mod clock;
mod config;
mod errors;
mod leaky_limiter;
mod stream;
mod window;

// public API exports
pub use clock::{Clock, ClockError, MonotonicClock, SystemClock};
pub use config::{DEFAULT_BOOST, LeakyLimiterConfig, ReleaseMode};
pub use errors::LeakyLimiterError;
pub use leaky_limiter::{LeakyLimiter, TakeDecision};
