//! Error types produced by the fingerprint crate.
//!
//! All errors are typed, cloneable, and comparable so callers can branch on
//! specific failure cases and tests can assert on exact variants.

use thiserror::Error;

/// Errors produced by fingerprint construction, parsing, and the distance
/// primitives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FingerprintError {
    #[error("unrecognized hash kind `{kind}`")]
    InvalidHashKind { kind: String },

    #[error("fingerprint length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("fingerprint must not be empty")]
    EmptyFingerprint,

    #[error("invalid fingerprint encoding: {reason}")]
    InvalidEncoding { reason: String },

    #[error("non-finite ring value at position {index}")]
    NonFiniteValue { index: usize },

    #[error("ring vector has zero variance; correlation is undefined")]
    ZeroVariance,

    #[error("invalid config: img_hash_size must be >= 1 (got {size})")]
    InvalidImgHashSize { size: usize },

    #[error("invalid config: nmf_hash_size must be >= 1 (got {size})")]
    InvalidNmfHashSize { size: usize },

    #[error("invalid config: nmf_rings must be >= 1 (got {rings})")]
    InvalidNmfRings { rings: usize },

    #[error("hash backend failure: {message}")]
    Provider { message: String },
}
