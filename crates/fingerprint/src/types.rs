//! Fingerprint representations for the four hash kinds.
//!
//! Bit-vector fingerprints (dhash, phash, whash) and real-valued ring
//! fingerprints (nmfhash) both round-trip through a stable string encoding,
//! so similarity can be computed over persisted hash strings without
//! re-deriving fingerprints from images.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;
use crate::kind::{HashKind, Metric};

/// Packed bit-vector fingerprint for the Hamming-compared hash kinds.
///
/// An `n x n` image hash carries `n * n` bits. Bits are stored LSB-first
/// inside 64-bit words; unused high bits of the last word are always zero so
/// equality and popcounts are well defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BitFingerprint {
    words: Vec<u64>,
    bit_len: usize,
}

impl BitFingerprint {
    /// Build a fingerprint from individual bits, in hash order.
    pub fn from_bits(bits: &[bool]) -> Result<Self, FingerprintError> {
        if bits.is_empty() {
            return Err(FingerprintError::EmptyFingerprint);
        }
        let mut words = vec![0u64; bits.len().div_ceil(64)];
        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                words[i / 64] |= 1u64 << (i % 64);
            }
        }
        Ok(Self {
            words,
            bit_len: bits.len(),
        })
    }

    /// Number of bits in the fingerprint.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Value of bit `index`, in hash order.
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.bit_len);
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Packed word view, for the Hamming primitive.
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }
}

/// Hex encoding, MSB-first per nibble (nibble `j` covers bits `4j..4j+4`,
/// with bit `4j` as the nibble's most significant bit). A bit length that is
/// not a nibble multiple is zero-padded in the final nibble.
impl fmt::Display for BitFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for j in 0..self.bit_len.div_ceil(4) {
            let mut nibble = 0u32;
            for k in 0..4 {
                let idx = 4 * j + k;
                if idx < self.bit_len && self.bit(idx) {
                    nibble |= 1 << (3 - k);
                }
            }
            let c = char::from_digit(nibble, 16).ok_or(fmt::Error)?;
            f.write_fmt(format_args!("{c}"))?;
        }
        Ok(())
    }
}

impl FromStr for BitFingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FingerprintError::EmptyFingerprint);
        }
        let mut bits = Vec::with_capacity(s.len() * 4);
        for c in s.chars() {
            let nibble = c
                .to_digit(16)
                .ok_or_else(|| FingerprintError::InvalidEncoding {
                    reason: format!("non-hex character `{c}`"),
                })?;
            for k in 0..4 {
                bits.push((nibble >> (3 - k)) & 1 == 1);
            }
        }
        Self::from_bits(&bits)
    }
}

/// Real-valued ring fingerprint for the Pearson-compared nmfhash.
///
/// One value per concentric ring of the NMF decomposition. Values must be
/// finite; NaN is reserved as an "unset" marker upstream and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RingFingerprint {
    values: Vec<f64>,
}

impl RingFingerprint {
    /// Build a ring fingerprint, rejecting empty and non-finite input.
    pub fn new(values: Vec<f64>) -> Result<Self, FingerprintError> {
        if values.is_empty() {
            return Err(FingerprintError::EmptyFingerprint);
        }
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(FingerprintError::NonFiniteValue { index });
            }
        }
        Ok(Self { values })
    }

    /// Ring values in ring order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the vector has no rings. Unreachable through [`Self::new`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Comma-separated decimal encoding; `f64` formatting round-trips exactly.
impl fmt::Display for RingFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_fmt(format_args!("{value}"))?;
        }
        Ok(())
    }
}

impl FromStr for RingFingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FingerprintError::EmptyFingerprint);
        }
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| FingerprintError::InvalidEncoding {
                        reason: format!("bad ring value `{part}`: {e}"),
                    })
            })
            .collect::<Result<Vec<f64>, FingerprintError>>()?;
        Self::new(values)
    }
}

/// A fingerprint under either encoding, tagged by representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "encoding", rename_all = "lowercase")]
pub enum Fingerprint {
    /// Bit-vector fingerprint (dhash, phash, whash).
    Bits(BitFingerprint),
    /// Ring-vector fingerprint (nmfhash).
    Rings(RingFingerprint),
}

impl Fingerprint {
    /// Parse a persisted hash string, choosing the codec by kind.
    pub fn parse(kind: HashKind, s: &str) -> Result<Self, FingerprintError> {
        match kind.metric() {
            Metric::Hamming => Ok(Fingerprint::Bits(s.parse()?)),
            Metric::Pearson => Ok(Fingerprint::Rings(s.parse()?)),
        }
    }

    /// Bit view, when this is a bit fingerprint.
    pub fn as_bits(&self) -> Option<&BitFingerprint> {
        match self {
            Fingerprint::Bits(bits) => Some(bits),
            Fingerprint::Rings(_) => None,
        }
    }

    /// Ring view, when this is a ring fingerprint.
    pub fn as_rings(&self) -> Option<&RingFingerprint> {
        match self {
            Fingerprint::Bits(_) => None,
            Fingerprint::Rings(rings) => Some(rings),
        }
    }

    /// Name of the carried encoding, for diagnostics.
    pub fn encoding_name(&self) -> &'static str {
        match self {
            Fingerprint::Bits(_) => "bits",
            Fingerprint::Rings(_) => "rings",
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fingerprint::Bits(bits) => bits.fmt(f),
            Fingerprint::Rings(rings) => rings.fmt(f),
        }
    }
}
