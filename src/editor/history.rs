//! Bounded linear undo history

use std::collections::VecDeque;

/// Default number of snapshots kept
pub const MAX_HISTORY: usize = 50;

/// A linear list of snapshots with a cursor
///
/// Always holds at least one entry. Pushing drops everything after the
/// cursor (the redo branch) and evicts the oldest entries once `capacity` is
/// exceeded, so the cursor always ends on the newest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    index: usize,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Start a history holding only `initial`. A capacity of 0 is treated as 1.
    pub fn new(initial: T, capacity: usize) -> Self {
        let mut entries = VecDeque::with_capacity(capacity.clamp(1, MAX_HISTORY));
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Discard everything and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }

    /// Append a snapshot after the cursor. Returns how many old entries
    /// were evicted to stay within capacity.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(entry);

        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        self.index = self.entries.len() - 1;
        evicted
    }

    /// Step back one entry; `None` when already at the oldest
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one entry; `None` when already at the newest
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// The entry under the cursor
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshots are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
