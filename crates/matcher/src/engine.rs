use std::time::Instant;

use fingerprint::HashKind;

use crate::metrics::metrics_recorder;
use crate::similarity::{is_match, ThresholdConfig};
use crate::tree::DecisionTree;
use crate::types::{MatchError, MatchStrategy, SimilarityVector};

#[cfg(test)]
mod tests;

/// Fusion decider for one matching session.
///
/// Owns the session's [`ThresholdConfig`] and [`DecisionTree`] and applies a
/// [`MatchStrategy`] to a [`SimilarityVector`] to yield a boolean verdict.
/// All decision paths are pure with respect to the owned configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Decider {
    thresholds: ThresholdConfig,
    tree: DecisionTree,
}

impl Decider {
    /// Construct a decider with explicit thresholds and the tuned tree.
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self {
            thresholds,
            tree: DecisionTree::tuned(),
        }
    }

    /// Replace the decision tree, e.g. with a re-tuned topology.
    pub fn with_tree(mut self, tree: DecisionTree) -> Self {
        self.tree = tree;
        self
    }

    /// Replace the session thresholds. This is the only reconfiguration
    /// path; nothing mutates thresholds mid-decision.
    pub fn set_thresholds(&mut self, thresholds: ThresholdConfig) {
        self.thresholds = thresholds;
    }

    /// Session thresholds.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Session decision tree.
    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// One kind's individual thresholded verdict.
    pub fn single_match(
        &self,
        kind: HashKind,
        sims: &SimilarityVector,
    ) -> Result<bool, MatchError> {
        let score = sims.require(kind)?;
        is_match(kind, score, &self.thresholds)
    }

    /// Vote across all four kinds.
    ///
    /// The verdict is true when more than `tie_threshold` kinds match. At
    /// exactly `tie_threshold`, dhash's own verdict decides: the tie-break
    /// deliberately makes the cheapest structural signal authoritative at
    /// the boundary.
    pub fn majority_match(
        &self,
        sims: &SimilarityVector,
        tie_threshold: usize,
    ) -> Result<bool, MatchError> {
        if tie_threshold >= HashKind::COUNT {
            return Err(MatchError::InvalidThreshold {
                value: tie_threshold,
                limit: HashKind::COUNT,
            });
        }

        let mut match_count = 0;
        let mut dhash_verdict = false;
        for kind in HashKind::ALL {
            let verdict = self.single_match(kind, sims)?;
            if verdict {
                match_count += 1;
            }
            if kind == HashKind::Dhash {
                dhash_verdict = verdict;
            }
        }

        if match_count == tie_threshold {
            Ok(dhash_verdict)
        } else {
            Ok(match_count > tie_threshold)
        }
    }

    /// The fixed decision tree's verdict.
    pub fn tree_match(&self, sims: &SimilarityVector) -> Result<bool, MatchError> {
        self.tree.evaluate(sims)
    }

    /// Apply a strategy and report the decision to the metrics hook when
    /// one is installed.
    pub fn decide(
        &self,
        strategy: &MatchStrategy,
        sims: &SimilarityVector,
    ) -> Result<bool, MatchError> {
        let start = Instant::now();
        let verdict = match strategy {
            MatchStrategy::Single { kind } => self.single_match(*kind, sims),
            MatchStrategy::Majority { tie_threshold } => {
                self.majority_match(sims, *tie_threshold)
            }
            MatchStrategy::DecisionTree => self.tree_match(sims),
        }?;

        if let Some(recorder) = metrics_recorder() {
            recorder.record_decision(strategy.label(), verdict, start.elapsed());
        }

        Ok(verdict)
    }
}

impl Default for Decider {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}
