//! Bounded generation history used to spot repeating states.

use std::collections::VecDeque;

/// Fingerprints of the most recent generations
#[derive(Debug, Clone)]
pub struct CycleHistory {
    capacity: usize,
    entries: VecDeque<(u64, u64)>,
}

impl CycleHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Forget every remembered generation
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Remember `fingerprint` for `generation`.
    ///
    /// Returns the period when the same fingerprint was already seen within the window.
    pub fn record(&mut self, generation: u64, fingerprint: u64) -> Option<u64> {
        if self.capacity == 0 {
            return None;
        }

        let period = self
            .entries
            .iter()
            .rev()
            .find(|(_, seen)| *seen == fingerprint)
            .map(|(seen_generation, _)| generation.saturating_sub(*seen_generation));

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((generation, fingerprint));

        period
    }
}
