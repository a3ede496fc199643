//! Bounded telemetry history
//!
//! Append-only ring of the most recent [`MotorSample`]s, capacity-bounded
//! with FIFO eviction. Insertion order equals generation order and entries
//! are never mutated after insertion.

use std::collections::VecDeque;

use crate::types::MotorSample;

/// Fixed retention bound for the dashboard history window.
pub const HISTORY_CAPACITY: usize = 30;

/// Window size handed to the remote diagnosis client.
pub const DIAGNOSIS_WINDOW: usize = 10;

/// Order-preserving, capacity-bounded sample buffer.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    samples: VecDeque<MotorSample>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append a sample, evicting from the front once over capacity.
    pub fn append(&mut self, sample: MotorSample) {
        if self.samples.len() >= HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Current number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Retention bound (for the dashboard "N/30" indicator).
    pub fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }

    /// Most recently appended sample, if any.
    pub fn latest(&self) -> Option<&MotorSample> {
        self.samples.back()
    }

    /// The last `k` samples in append order (fewer if the buffer is shorter).
    pub fn tail(&self, k: usize) -> Vec<MotorSample> {
        let skip = self.samples.len().saturating_sub(k);
        self.samples.iter().skip(skip).cloned().collect()
    }

    /// Full retained history in append order.
    pub fn snapshot(&self) -> Vec<MotorSample> {
        self.samples.iter().cloned().collect()
    }
}
