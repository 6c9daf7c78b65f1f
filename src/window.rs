// src/window.rs

//! Sliding one-second ledger of past releases.
//!
//! Entries are kept newest first. Every total query walks the ledger and cuts
//! it at the first entry that has fallen out of the trailing second, so the
//! ledger never holds more than one second of history past the latest query.

// dependencies
use crate::clock::NANOS_PER_SEC;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    amount: u64,
    at: u64,
}

#[derive(Debug, Default)]
pub(crate) struct SlidingWindow {
    entries: VecDeque<Entry>,
}

impl SlidingWindow {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a release of `amount` units at `at` (nanoseconds).
    pub(crate) fn record(&mut self, amount: u64, at: u64) {
        self.entries.push_front(Entry { amount, at });
    }

    /// Total released in `(now - 1s, now]`, dropping everything older.
    pub(crate) fn total_at(&mut self, now: u64) -> u64 {
        let mut total = 0u64;
        let mut cut = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            if now.saturating_sub(entry.at) >= NANOS_PER_SEC {
                cut = Some(idx);
                break;
            }
            total = total.saturating_add(entry.amount);
        }
        if let Some(idx) = cut {
            self.entries.truncate(idx);
        }
        total
    }

    /// Timestamp of the newest entry still held.
    pub(crate) fn newest(&self) -> Option<u64> {
        self.entries.front().map(|e| e.at)
    }

    /// Timestamp of the oldest entry still held.
    pub(crate) fn oldest(&self) -> Option<u64> {
        self.entries.back().map(|e| e.at)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
