//! Size parameters handed to a hash backend.
//!
//! The config is caller-owned and passed by reference into every
//! fingerprinting call; there is no ambient global configuration.

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

/// Per-algorithm size parameters for fingerprint production.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// Downscale edge for dhash, phash, and whash (`n x n` bits).
    pub img_hash_size: usize,
    /// Downscale edge for the nmfhash decomposition input.
    pub nmf_hash_size: usize,
    /// Number of concentric rings in the nmfhash vector.
    pub nmf_rings: usize,
}

impl FingerprintConfig {
    /// Create a configuration with the tuned defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image hash edge size. The bit fingerprints carry
    /// `img_hash_size * img_hash_size` bits.
    pub fn with_img_hash_size(mut self, size: usize) -> Self {
        self.img_hash_size = size;
        self
    }

    /// Set the nmfhash downscale edge.
    pub fn with_nmf_hash_size(mut self, size: usize) -> Self {
        self.nmf_hash_size = size;
        self
    }

    /// Set the number of nmfhash rings.
    pub fn with_nmf_rings(mut self, rings: usize) -> Self {
        self.nmf_rings = rings;
        self
    }

    /// Expected width of the bit fingerprints, in bits.
    pub fn bit_count(&self) -> usize {
        self.img_hash_size * self.img_hash_size
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.img_hash_size < 1 {
            return Err(FingerprintError::InvalidImgHashSize {
                size: self.img_hash_size,
            });
        }
        if self.nmf_hash_size < 1 {
            return Err(FingerprintError::InvalidNmfHashSize {
                size: self.nmf_hash_size,
            });
        }
        if self.nmf_rings < 1 {
            return Err(FingerprintError::InvalidNmfRings {
                rings: self.nmf_rings,
            });
        }
        Ok(())
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            img_hash_size: 16,
            nmf_hash_size: 512,
            nmf_rings: 32,
        }
    }
}
