//! Hash backend contract.
//!
//! The image-to-fingerprint transforms (gradient hashing, DCT, wavelet
//! decomposition, the NMF ring math) and image decoding live behind this
//! trait. The decision layers in this workspace never see pixels.

use crate::config::FingerprintConfig;
use crate::error::FingerprintError;
use crate::kind::HashKind;
use crate::types::Fingerprint;

/// Produces fingerprints for each hash kind from a decoded image.
///
/// Implementations must be deterministic: the same image, kind, and config
/// always yield the same fingerprint. A bit kind must return
/// [`Fingerprint::Bits`] of `cfg.bit_count()` bits; nmfhash must return
/// [`Fingerprint::Rings`] of `cfg.nmf_rings` values. Backend-specific
/// failures are reported as [`FingerprintError::Provider`].
pub trait HashProvider {
    /// The backend's decoded image representation.
    type Image;

    /// Compute the fingerprint of `image` under `kind`.
    fn fingerprint(
        &self,
        kind: HashKind,
        image: &Self::Image,
        cfg: &FingerprintConfig,
    ) -> Result<Fingerprint, FingerprintError>;
}
