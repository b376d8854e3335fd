//! In-memory record of measurements the monitor has already evaluated.
//!
//! The tracker is never persisted, so a restart re-arms every measurement in
//! the fetch window. It is capacity-bounded: once full, the oldest identifier
//! is evicted. The capacity must stay well above the monitor's fetch limit so
//! an evicted identifier can no longer be returned by a fetch.

use std::collections::{HashSet, VecDeque};

use crate::types::DbId;

/// Default number of identifiers retained before eviction starts.
pub const DEFAULT_SEEN_CAPACITY: usize = 10_000;

/// Bounded set of measurement ids with oldest-first eviction.
#[derive(Debug)]
pub struct SeenTracker {
    ids: HashSet<DbId>,
    order: VecDeque<DbId>,
    capacity: usize,
}

impl Default for SeenTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SEEN_CAPACITY)
    }
}

impl SeenTracker {
    /// Create a tracker holding at most `capacity` ids (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: HashSet::with_capacity(capacity.min(DEFAULT_SEEN_CAPACITY)),
            order: VecDeque::with_capacity(capacity.min(DEFAULT_SEEN_CAPACITY)),
            capacity,
        }
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.ids.contains(&id)
    }

    /// Record `id` as evaluated.
    ///
    /// Returns `false` if it was already present (no state change).
    pub fn mark(&mut self, id: DbId) -> bool {
        if !self.ids.insert(id) {
            return false;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.ids.remove(&evicted);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
