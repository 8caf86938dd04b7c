//! Workspace umbrella crate for near-duplicate image detection.
//!
//! This crate stitches together the fingerprint, matching, and evaluation
//! layers so callers can go from two images (or two sets of persisted hash
//! strings) to a match/no-match verdict with a single API entry point.
//!
//! The pipeline is: a [`HashProvider`] backend produces one fingerprint per
//! hash kind for each image; the similarity layer scores each kind's pair of
//! fingerprints; a [`Decider`] fuses the four scores into a verdict under
//! the chosen [`MatchStrategy`]; and, for offline tuning, the `eval` layer
//! scores a strategy's classification quality against labeled data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use eval::{
    derive_metrics, evaluate, run_strategy, run_strategy_parallel, ConfusionMatrix, EvalError,
    Evaluation, LabeledSample, MetricsReport,
};
pub use fingerprint::{
    hamming_distance, pearson_correlation, BitFingerprint, Fingerprint, FingerprintConfig,
    FingerprintError, HashKind, HashProvider, MatchDirection, Metric, RingFingerprint,
};
pub use matcher::{
    bit_similarity, compare, is_match, ring_similarity, set_decision_metrics, similarity,
    DecisionMetrics, DecisionTree, Decider, MatchError, MatchStrategy, SimilarityVector,
    ThresholdConfig, TreeNode,
};

/// Errors that can occur while driving the full comparison pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// Fingerprint production or parsing failed.
    #[error("fingerprinting failed: {0}")]
    Fingerprint(#[from] FingerprintError),
    /// Similarity scoring or fusion failed.
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    /// A hash backend returned the wrong encoding for a kind.
    #[error("hash provider returned a non-{expected} fingerprint for `{kind}`")]
    UnexpectedFingerprint {
        kind: HashKind,
        expected: &'static str,
    },
}

/// The four fingerprints of one image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintSet {
    /// Difference hash bits.
    pub dhash: BitFingerprint,
    /// Perceptual hash bits.
    pub phash: BitFingerprint,
    /// Wavelet hash bits.
    pub whash: BitFingerprint,
    /// NMF ring vector.
    pub nmfhash: RingFingerprint,
}

fn expect_bits(kind: HashKind, fp: Fingerprint) -> Result<BitFingerprint, PipelineError> {
    match fp {
        Fingerprint::Bits(bits) => Ok(bits),
        Fingerprint::Rings(_) => Err(PipelineError::UnexpectedFingerprint {
            kind,
            expected: "bits",
        }),
    }
}

fn expect_rings(kind: HashKind, fp: Fingerprint) -> Result<RingFingerprint, PipelineError> {
    match fp {
        Fingerprint::Rings(rings) => Ok(rings),
        Fingerprint::Bits(_) => Err(PipelineError::UnexpectedFingerprint {
            kind,
            expected: "rings",
        }),
    }
}

/// Fingerprint one image under all four hash kinds.
pub fn fingerprint_set<P: HashProvider>(
    provider: &P,
    image: &P::Image,
    cfg: &FingerprintConfig,
) -> Result<FingerprintSet, PipelineError> {
    cfg.validate()?;
    Ok(FingerprintSet {
        dhash: expect_bits(
            HashKind::Dhash,
            provider.fingerprint(HashKind::Dhash, image, cfg)?,
        )?,
        phash: expect_bits(
            HashKind::Phash,
            provider.fingerprint(HashKind::Phash, image, cfg)?,
        )?,
        whash: expect_bits(
            HashKind::Whash,
            provider.fingerprint(HashKind::Whash, image, cfg)?,
        )?,
        nmfhash: expect_rings(
            HashKind::Nmfhash,
            provider.fingerprint(HashKind::Nmfhash, image, cfg)?,
        )?,
    })
}

/// Score every kind's fingerprint pair into one similarity vector.
pub fn similarity_vector(
    a: &FingerprintSet,
    b: &FingerprintSet,
) -> Result<SimilarityVector, PipelineError> {
    Ok(SimilarityVector::from_parts(
        bit_similarity(&a.dhash, &b.dhash)?,
        bit_similarity(&a.phash, &b.phash)?,
        bit_similarity(&a.whash, &b.whash)?,
        ring_similarity(&a.nmfhash, &b.nmfhash)?,
    ))
}

/// Compare two fingerprint sets end to end under a fusion strategy.
pub fn compare_sets(
    a: &FingerprintSet,
    b: &FingerprintSet,
    decider: &Decider,
    strategy: &MatchStrategy,
) -> Result<bool, PipelineError> {
    let sims = similarity_vector(a, b)?;
    Ok(decider.decide(strategy, &sims)?)
}
