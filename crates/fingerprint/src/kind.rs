//! Hash kind enumeration and the per-kind capability table.
//!
//! Every place that needs to branch on the hash algorithm goes through this
//! table (distance metric, match direction, tuned default threshold). Adding
//! a fifth hash kind means extending the table here, not touching call sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

/// The four supported perceptual hash algorithms.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum HashKind {
    /// Difference hash over adjacent-pixel gradients.
    Dhash,
    /// Perceptual hash over low-frequency DCT coefficients.
    Phash,
    /// Wavelet hash over a Haar decomposition.
    Whash,
    /// Ring-based non-negative-matrix-factorization hash.
    Nmfhash,
}

/// Distance primitive applied when comparing two fingerprints of a kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Count of differing bit positions; lower is more similar.
    Hamming,
    /// Pearson correlation coefficient; higher is more similar.
    Pearson,
}

/// Which side of the threshold counts as a match for a kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchDirection {
    /// Match iff similarity is strictly below the threshold.
    Below,
    /// Match iff similarity is strictly above the threshold.
    Above,
}

impl HashKind {
    /// All kinds in canonical order: dhash, phash, whash, nmfhash.
    ///
    /// This order is significant: batch evaluation rows and similarity
    /// vectors are keyed by it.
    pub const ALL: [HashKind; 4] = [
        HashKind::Dhash,
        HashKind::Phash,
        HashKind::Whash,
        HashKind::Nmfhash,
    ];

    /// Number of supported hash kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Distance primitive for this kind.
    pub fn metric(self) -> Metric {
        match self {
            HashKind::Dhash | HashKind::Phash | HashKind::Whash => Metric::Hamming,
            HashKind::Nmfhash => Metric::Pearson,
        }
    }

    /// Threshold comparison direction for this kind.
    pub fn direction(self) -> MatchDirection {
        match self.metric() {
            Metric::Hamming => MatchDirection::Below,
            Metric::Pearson => MatchDirection::Above,
        }
    }

    /// Tuned default threshold from offline evaluation.
    pub fn default_threshold(self) -> f64 {
        match self {
            HashKind::Dhash => 0.334,
            HashKind::Phash => 0.348,
            HashKind::Whash => 0.191,
            HashKind::Nmfhash => 0.952,
        }
    }

    /// Stable lowercase name, matching the serde tag.
    pub fn as_str(self) -> &'static str {
        match self {
            HashKind::Dhash => "dhash",
            HashKind::Phash => "phash",
            HashKind::Whash => "whash",
            HashKind::Nmfhash => "nmfhash",
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashKind {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dhash" => Ok(HashKind::Dhash),
            "phash" => Ok(HashKind::Phash),
            "whash" => Ok(HashKind::Whash),
            "nmfhash" => Ok(HashKind::Nmfhash),
            other => Err(FingerprintError::InvalidHashKind {
                kind: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        let names: Vec<&str> = HashKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["dhash", "phash", "whash", "nmfhash"]);
    }

    #[test]
    fn bit_kinds_use_hamming_below() {
        for kind in [HashKind::Dhash, HashKind::Phash, HashKind::Whash] {
            assert_eq!(kind.metric(), Metric::Hamming);
            assert_eq!(kind.direction(), MatchDirection::Below);
        }
    }

    #[test]
    fn nmfhash_uses_pearson_above() {
        assert_eq!(HashKind::Nmfhash.metric(), Metric::Pearson);
        assert_eq!(HashKind::Nmfhash.direction(), MatchDirection::Above);
    }

    #[test]
    fn tuned_default_thresholds() {
        assert_eq!(HashKind::Dhash.default_threshold(), 0.334);
        assert_eq!(HashKind::Phash.default_threshold(), 0.348);
        assert_eq!(HashKind::Whash.default_threshold(), 0.191);
        assert_eq!(HashKind::Nmfhash.default_threshold(), 0.952);
    }

    #[test]
    fn parse_roundtrip() {
        for kind in HashKind::ALL {
            let parsed: HashKind = kind.as_str().parse().expect("parses");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = "ahash".parse::<HashKind>().expect_err("should fail");
        assert_eq!(
            err,
            FingerprintError::InvalidHashKind {
                kind: "ahash".to_string()
            }
        );
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&HashKind::Nmfhash).unwrap();
        assert_eq!(json, "\"nmfhash\"");
        let back: HashKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HashKind::Nmfhash);
    }
}
