//! Near-duplicate image fingerprint layer.
//!
//! This crate defines the data model shared by the matching and evaluation
//! layers: the four hash kinds, their fingerprint representations, and the
//! two atomic distance primitives.
//!
//! ## What we do here
//!
//! - **Hash kinds** - The capability table mapping each kind to its distance
//!   metric, match direction, and tuned default threshold
//! - **Fingerprints** - Packed bit vectors for dhash/phash/whash, real-valued
//!   ring vectors for nmfhash, each with a stable string codec so persisted
//!   hash strings round-trip
//! - **Distance primitives** - Bit-level Hamming distance and Pearson
//!   correlation, both pure and typed-error-guarded
//! - **Provider contract** - The [`HashProvider`] seam behind which the hash
//!   math and image decoding live
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no hidden state. Same inputs, same outputs, on
//! any machine.
//!
//! ## Example
//!
//! ```
//! use fingerprint::{hamming_distance, BitFingerprint, Fingerprint, HashKind};
//!
//! let a = Fingerprint::parse(HashKind::Dhash, "ff00").unwrap();
//! let b = Fingerprint::parse(HashKind::Dhash, "ff0f").unwrap();
//! let dist = hamming_distance(a.as_bits().unwrap(), b.as_bits().unwrap()).unwrap();
//! assert_eq!(dist, 4);
//! ```

mod config;
mod distance;
mod error;
mod kind;
mod provider;
mod types;

pub use crate::config::FingerprintConfig;
pub use crate::distance::{hamming_distance, pearson_correlation};
pub use crate::error::FingerprintError;
pub use crate::kind::{HashKind, MatchDirection, Metric};
pub use crate::provider::HashProvider;
pub use crate::types::{BitFingerprint, Fingerprint, RingFingerprint};
