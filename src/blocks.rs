// src/blocks.rs

//! Block scheduler for the block-preserving mode.
//!
//! Blocks are handed back whole and in arrival order. A block is always
//! released as soon as the trailing second is within the limit, even when the
//! block itself pushes the window over it; the overshoot is paid back by
//! holding the next release until the window total has drained at the
//! nominal rate.

// dependencies
use crate::clock::NANOS_PER_SEC;
use crate::leaky_limiter::TakeDecision;
use crate::window::SlidingWindow;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct BlockQueue {
    blocks: VecDeque<u64>,
    // wide enough that any number of u64 blocks sums exactly
    pending: u128,
    next_eligible: Option<u64>,
}

impl BlockQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, size: u64) {
        // an empty block has nothing to deliver and would read as idle
        if size == 0 {
            return;
        }
        self.blocks.push_back(size);
        self.pending += size as u128;
    }

    /// Sum of the sizes of all queued blocks.
    pub(crate) fn pending_units(&self) -> u64 {
        self.pending.min(u64::MAX as u128) as u64
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn take(
        &mut self,
        now: u64,
        limit: u64,
        window: &mut SlidingWindow,
    ) -> TakeDecision {
        if let Some(eligible) = self.next_eligible {
            if now < eligible {
                return TakeDecision::throttled(Duration::from_nanos(eligible - now));
            }
        }
        self.next_eligible = None;

        let total = window.total_at(now);
        if total > limit {
            let wait = self.schedule(now, total, limit, window);
            return TakeDecision::throttled(Duration::from_nanos(wait));
        }

        let Some(block) = self.blocks.pop_front() else {
            return TakeDecision::idle();
        };
        self.pending -= block as u128;
        window.record(block, now);

        let total = total.saturating_add(block);
        if total > limit {
            let penalty = self.schedule(now, total, limit, window);
            debug!(
                block,
                total,
                limit,
                penalty_nanos = penalty,
                "block overshoots limit"
            );
        }
        TakeDecision::ready(block)
    }

    /// Hold further releases until `owed` units would have drained at the
    /// nominal rate, counting from the oldest entry still in the window.
    fn schedule(&mut self, now: u64, owed: u64, limit: u64, window: &SlidingWindow) -> u64 {
        let drain = (owed as u128 * NANOS_PER_SEC as u128 / limit as u128)
            .min(u64::MAX as u128) as u64;
        let paid = window.oldest().map_or(0, |oldest| now.saturating_sub(oldest));
        let penalty = drain.saturating_sub(paid).max(1);
        self.next_eligible = Some(now.saturating_add(penalty));
        penalty
    }
}
