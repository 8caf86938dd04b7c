//! Atomic distance primitives.
//!
//! These are the only two comparisons the decision layers ever need: a
//! bit-level Hamming distance for the bit-vector kinds and a Pearson
//! correlation for ring vectors. Both are pure functions of their inputs.

use crate::error::FingerprintError;
use crate::types::{BitFingerprint, RingFingerprint};

/// Count of differing bit positions between two fingerprints of equal width.
pub fn hamming_distance(
    a: &BitFingerprint,
    b: &BitFingerprint,
) -> Result<u32, FingerprintError> {
    if a.bit_len() != b.bit_len() {
        return Err(FingerprintError::LengthMismatch {
            left: a.bit_len(),
            right: b.bit_len(),
        });
    }
    Ok(a.words()
        .iter()
        .zip(b.words())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum())
}

/// Sample Pearson correlation coefficient between two ring vectors.
///
/// Fails with [`FingerprintError::ZeroVariance`] when either vector is
/// constant, rather than producing NaN.
pub fn pearson_correlation(
    a: &RingFingerprint,
    b: &RingFingerprint,
) -> Result<f64, FingerprintError> {
    if a.len() != b.len() {
        return Err(FingerprintError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let n = a.len() as f64;
    let mean_a = a.values().iter().sum::<f64>() / n;
    let mean_b = b.values().iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (x, y) in a.values().iter().zip(b.values()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    if variance_a == 0.0 || variance_b == 0.0 {
        return Err(FingerprintError::ZeroVariance);
    }

    Ok(covariance / (variance_a.sqrt() * variance_b.sqrt()))
}
