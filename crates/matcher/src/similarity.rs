//! Per-kind similarity scoring and threshold comparison.
//!
//! This is the normalization layer between the raw distance primitives and
//! the fusion strategies: every kind comes out as one scalar on a known
//! scale, and `is_match` applies the kind's direction against a caller-owned
//! threshold config. Everything here is a pure function of its arguments.

use std::collections::BTreeMap;

use fingerprint::{
    hamming_distance, pearson_correlation, BitFingerprint, Fingerprint, HashKind,
    MatchDirection, Metric, RingFingerprint,
};
use serde::{Deserialize, Serialize};

use crate::types::MatchError;

/// Per-kind match thresholds.
///
/// Caller-owned; one instance per matching session. [`Default`] carries the
/// tuned values from offline evaluation. Reconfiguration goes through
/// [`ThresholdConfig::set`] (or the builder), never through ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdConfig {
    thresholds: BTreeMap<HashKind, f64>,
}

impl ThresholdConfig {
    /// Config with the tuned default threshold for every kind.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with no entries. Comparisons against it fail with
    /// [`MatchError::MissingThreshold`] until thresholds are supplied.
    pub fn empty() -> Self {
        Self {
            thresholds: BTreeMap::new(),
        }
    }

    /// Builder form of [`Self::set`].
    pub fn with_threshold(mut self, kind: HashKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Set the threshold for `kind`. This is the only reconfiguration path.
    pub fn set(&mut self, kind: HashKind, value: f64) {
        self.thresholds.insert(kind, value);
    }

    /// Threshold for `kind`, if configured.
    pub fn get(&self, kind: HashKind) -> Option<f64> {
        self.thresholds.get(&kind).copied()
    }

    /// Validate every configured threshold against its kind's similarity
    /// range: `[0, 1]` for the Hamming kinds, `[-1, 1]` for nmfhash.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (kind, value) in &self.thresholds {
            let lower = match kind.metric() {
                Metric::Hamming => 0.0,
                Metric::Pearson => -1.0,
            };
            if !value.is_finite() || *value < lower || *value > 1.0 {
                return Err(MatchError::InvalidThresholdValue {
                    kind: *kind,
                    value: *value,
                });
            }
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let mut thresholds = BTreeMap::new();
        for kind in HashKind::ALL {
            thresholds.insert(kind, kind.default_threshold());
        }
        Self { thresholds }
    }
}

/// Normalized Hamming similarity between two bit fingerprints: differing
/// bits over total bits, in `[0, 1]`. Zero means identical.
pub fn bit_similarity(a: &BitFingerprint, b: &BitFingerprint) -> Result<f64, MatchError> {
    let distance = hamming_distance(a, b)?;
    Ok(f64::from(distance) / a.bit_len() as f64)
}

/// Pearson similarity between two ring fingerprints, in `[-1, 1]`. One means
/// identical (up to affine scaling).
pub fn ring_similarity(a: &RingFingerprint, b: &RingFingerprint) -> Result<f64, MatchError> {
    Ok(pearson_correlation(a, b)?)
}

/// Similarity between two fingerprints of the same kind, on the kind's
/// scale. The fingerprints must carry the encoding the kind calls for.
pub fn similarity(
    kind: HashKind,
    fp1: &Fingerprint,
    fp2: &Fingerprint,
) -> Result<f64, MatchError> {
    match (kind.metric(), fp1, fp2) {
        (Metric::Hamming, Fingerprint::Bits(a), Fingerprint::Bits(b)) => bit_similarity(a, b),
        (Metric::Pearson, Fingerprint::Rings(a), Fingerprint::Rings(b)) => ring_similarity(a, b),
        _ => Err(MatchError::FingerprintKindMismatch { kind }),
    }
}

/// Apply `kind`'s threshold to a similarity score.
///
/// Hamming kinds match strictly below the threshold; nmfhash strictly above.
/// The boundary itself is never a match in either direction.
pub fn is_match(
    kind: HashKind,
    similarity: f64,
    thresholds: &ThresholdConfig,
) -> Result<bool, MatchError> {
    let threshold = thresholds
        .get(kind)
        .ok_or(MatchError::MissingThreshold { kind })?;
    Ok(match kind.direction() {
        MatchDirection::Below => similarity < threshold,
        MatchDirection::Above => similarity > threshold,
    })
}

/// Score two fingerprints and apply the kind's threshold in one step.
pub fn compare(
    kind: HashKind,
    fp1: &Fingerprint,
    fp2: &Fingerprint,
    thresholds: &ThresholdConfig,
) -> Result<bool, MatchError> {
    let score = similarity(kind, fp1, fp2)?;
    is_match(kind, score, thresholds)
}
