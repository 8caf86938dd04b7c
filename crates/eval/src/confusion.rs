//! Confusion-matrix accumulation.

use serde::{Deserialize, Serialize};

/// Four verdict counters ("positive" means a matching pair).
///
/// Created empty, incremented per labeled sample, read when metrics are
/// derived. Accumulators carry no locking; parallel evaluation uses one per
/// worker and merges afterward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Predicted matching, actually matching.
    pub true_positives: u64,
    /// Predicted non-matching, actually non-matching.
    pub true_negatives: u64,
    /// Predicted matching, actually non-matching.
    pub false_positives: u64,
    /// Predicted non-matching, actually matching.
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one verdict against its ground-truth label.
    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, true) => self.false_negatives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &ConfusionMatrix) {
        self.true_positives += other.true_positives;
        self.true_negatives += other.true_negatives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }

    /// Total number of recorded samples.
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
