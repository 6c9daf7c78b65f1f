// src/stream.rs

//! Capacity ledger for the divisible (streaming) mode.

// dependencies
use crate::clock::NANOS_PER_SEC;
use crate::leaky_limiter::TakeDecision;
use crate::window::SlidingWindow;
use std::time::Duration;

#[derive(Debug, Default)]
pub(crate) struct StreamBucket {
    size: u64,
    // None until the first non-empty take
    last_event: Option<u64>,
}

impl StreamBucket {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, units: u64) {
        self.size = self.size.saturating_add(units);
    }

    pub(crate) fn size(&self) -> u64 {
        self.size
    }

    /// Release as much as the boosted rate and the trailing second allow.
    pub(crate) fn take(
        &mut self,
        now: u64,
        limit: u64,
        boosted_rate: f64,
        window: &mut SlidingWindow,
    ) -> TakeDecision {
        if self.size == 0 {
            return TakeDecision::idle();
        }

        // a bucket that has never released is treated as fully rested
        let elapsed = self
            .last_event
            .map_or(NANOS_PER_SEC, |last| now.saturating_sub(last));
        self.last_event = Some(now);

        let max_output = if elapsed < NANOS_PER_SEC {
            boosted_rate * (elapsed as f64 / NANOS_PER_SEC as f64)
        } else {
            limit as f64
        };
        let max_output = max_output.min(limit as f64);

        // rounding happens after the limit clamp and before the bucket clamp
        let mut output = (max_output.round() as u64).min(self.size);
        if output == 0 {
            output = 1;
        }

        let history = window.total_at(now).min(limit);
        // history never exceeds the limit, so the headroom cannot underflow
        output = output.min(limit - history);

        self.size -= output;

        if output > 0 {
            window.record(output, now);
            return TakeDecision::ready(output);
        }

        let wait = window.newest().map_or(NANOS_PER_SEC, |newest| {
            NANOS_PER_SEC.saturating_sub(now.saturating_sub(newest))
        });
        TakeDecision::throttled(Duration::from_nanos(wait))
    }
}
