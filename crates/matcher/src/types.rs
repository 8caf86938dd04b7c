use fingerprint::{FingerprintError, HashKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-kind similarity scores for one image pair.
///
/// Produced fresh per comparison and never mutated by the decision paths.
/// The fusion strategies require all four entries; a partially populated
/// vector is a data-integrity error, not a soft case.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarityVector {
    /// Normalized dhash Hamming similarity.
    pub dhash: Option<f64>,
    /// Normalized phash Hamming similarity.
    pub phash: Option<f64>,
    /// Normalized whash Hamming similarity.
    pub whash: Option<f64>,
    /// nmfhash Pearson correlation.
    pub nmfhash: Option<f64>,
}

impl SimilarityVector {
    /// Build a fully populated vector.
    pub fn from_parts(dhash: f64, phash: f64, whash: f64, nmfhash: f64) -> Self {
        Self {
            dhash: Some(dhash),
            phash: Some(phash),
            whash: Some(whash),
            nmfhash: Some(nmfhash),
        }
    }

    /// Build from a row of values in canonical kind order:
    /// dhash, phash, whash, nmfhash. This is the column order of the
    /// offline evaluation datasets.
    pub fn from_row(values: [f64; 4]) -> Self {
        Self::from_parts(values[0], values[1], values[2], values[3])
    }

    /// Score for `kind`, if set.
    pub fn get(&self, kind: HashKind) -> Option<f64> {
        match kind {
            HashKind::Dhash => self.dhash,
            HashKind::Phash => self.phash,
            HashKind::Whash => self.whash,
            HashKind::Nmfhash => self.nmfhash,
        }
    }

    /// Set the score for `kind`.
    pub fn set(&mut self, kind: HashKind, value: f64) {
        match kind {
            HashKind::Dhash => self.dhash = Some(value),
            HashKind::Phash => self.phash = Some(value),
            HashKind::Whash => self.whash = Some(value),
            HashKind::Nmfhash => self.nmfhash = Some(value),
        }
    }

    /// Score for `kind`, or [`MatchError::IncompleteSimilarityVector`] when
    /// the entry is missing or non-finite (NaN is the upstream "unset"
    /// marker and never a legitimate similarity).
    pub fn require(&self, kind: HashKind) -> Result<f64, MatchError> {
        match self.get(kind) {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(MatchError::IncompleteSimilarityVector { kind }),
        }
    }

    /// True when every kind has a finite score.
    pub fn is_complete(&self) -> bool {
        HashKind::ALL.iter().all(|kind| self.require(*kind).is_ok())
    }
}

/// Declarative fusion strategy.
///
/// Callers describe how the four per-kind signals combine into one verdict
/// without hard-coding the logic at each call site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchStrategy {
    /// A single kind's thresholded verdict.
    Single { kind: HashKind },
    /// Vote across all four kinds; ties go to dhash.
    Majority {
        /// Verdict is true when more than this many kinds match; at exactly
        /// this many, dhash's own verdict decides. Must be below 4.
        #[serde(default = "MatchStrategy::default_tie_threshold")]
        tie_threshold: usize,
    },
    /// The fixed, hand-tuned decision tree over all four similarities.
    DecisionTree,
}

impl MatchStrategy {
    pub(crate) fn default_tie_threshold() -> usize {
        2
    }

    /// Default strategy: majority vote with the standard tie threshold.
    pub fn default_majority() -> Self {
        MatchStrategy::Majority {
            tie_threshold: Self::default_tie_threshold(),
        }
    }

    /// Stable strategy label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            MatchStrategy::Single { .. } => "single",
            MatchStrategy::Majority { .. } => "majority",
            MatchStrategy::DecisionTree => "decision_tree",
        }
    }
}

impl Default for MatchStrategy {
    fn default() -> Self {
        MatchStrategy::default_majority()
    }
}

/// Errors produced by the similarity and fusion layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Threshold config has no entry for a kind a comparison needs.
    #[error("missing threshold for hash kind `{kind}`")]
    MissingThreshold { kind: HashKind },

    /// Majority tie threshold outside `[0, 4)`.
    #[error("tie threshold {value} out of range [0, {limit})")]
    InvalidThreshold { value: usize, limit: usize },

    /// A fusion strategy was invoked with an unset or non-finite similarity.
    #[error("similarity vector has no usable `{kind}` entry")]
    IncompleteSimilarityVector { kind: HashKind },

    /// A configured threshold value is outside the kind's similarity range.
    #[error("threshold for `{kind}` out of range: {value}")]
    InvalidThresholdValue { kind: HashKind, value: f64 },

    /// A fingerprint's encoding does not suit the kind it was compared under.
    #[error("fingerprint encoding does not carry a `{kind}` hash")]
    FingerprintKindMismatch { kind: HashKind },

    /// A decision tree's node table is malformed.
    #[error("decision tree node {node} is invalid: {reason}")]
    InvalidTopology { node: usize, reason: String },

    /// Distance primitive failure.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}
