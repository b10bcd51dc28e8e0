//! `InvokeQueue` — sparse next-invoke schedule for traffic sources.
//!
//! Each source due in the future is registered under the exact `SimTime` at
//! which it must generate next.  A `run(now)` call drains only the sources
//! filed under `now`, and the earliest key is the manager's own next invoke
//! time, so neither needs a scan over every source.

use std::collections::BTreeMap;

use wn_core::{SimTime, SourceId};

/// A priority queue mapping invoke times → sources due at that time.
#[derive(Default)]
pub struct InvokeQueue {
    inner: BTreeMap<SimTime, Vec<SourceId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl InvokeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `source` to be invoked at `time`.
    pub fn push(&mut self, time: SimTime, source: SourceId) {
        self.inner.entry(time).or_default().push(source);
        self.total += 1;
    }

    /// Remove and return all sources scheduled for exactly `time`, in the
    /// order they were pushed.
    ///
    /// Returns `None` if nothing is queued for that time.
    pub fn drain_at(&mut self, time: SimTime) -> Option<Vec<SourceId>> {
        let sources = self.inner.remove(&time)?;
        self.total -= sources.len();
        Some(sources)
    }

    /// The earliest time with at least one queued source, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Number of queued sources whose invoke time is already before `now`.
    ///
    /// Non-zero means the host skipped past a time it was asked to run at.
    pub fn overdue(&self, now: SimTime) -> usize {
        self.inner.range(..now).map(|(_, v)| v.len()).sum()
    }

    /// Total number of (time, source) entries.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
