//! # Near-duplicate matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the fingerprint layer (`fingerprint`). It turns
//! raw distance outputs into normalized per-kind similarity scores and fuses
//! the four scores into a single match/no-match verdict under one of three
//! strategies: a single kind's threshold, a majority vote with a dhash
//! tie-break, or the fixed hand-tuned decision tree.
//!
//! In a typical deployment you will:
//! - Use a `HashProvider` backend to fingerprint images under all four hash
//!   kinds, or parse persisted hash strings.
//! - Use `matcher` to score pairs and apply a [`MatchStrategy`] per
//!   comparison, with thresholds owned by the calling session.
//!
//! ## Core Types
//!
//! - [`ThresholdConfig`]: per-kind thresholds; defaults are the tuned values
//!   from offline evaluation.
//! - [`SimilarityVector`]: the four per-kind scores for one image pair.
//! - [`MatchStrategy`]: declarative choice of fusion strategy.
//! - [`DecisionTree`] / [`TreeNode`]: the fixed classifier as auditable data.
//! - [`Decider`]: session object that applies strategies to score vectors.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Decider, MatchStrategy, SimilarityVector, ThresholdConfig};
//!
//! let decider = Decider::new(ThresholdConfig::default());
//! let sims = SimilarityVector::from_parts(0.2, 0.5, 0.1, 0.5);
//!
//! let verdict = decider
//!     .decide(&MatchStrategy::DecisionTree, &sims)
//!     .expect("complete vector");
//! assert!(verdict);
//! ```
//!
//! ## Observability
//!
//! Install a [`DecisionMetrics`] implementation via [`set_decision_metrics`]
//! to record per-decision strategy, verdict, and latency. This is typically
//! done once during service startup so all calls through [`Decider`] share
//! the same metrics backend.

pub mod engine;
pub mod metrics;
pub mod similarity;
pub mod tree;
pub mod types;

pub use crate::engine::Decider;
pub use crate::metrics::{set_decision_metrics, DecisionMetrics};
pub use crate::similarity::{
    bit_similarity, compare, is_match, ring_similarity, similarity, ThresholdConfig,
};
pub use crate::tree::{DecisionTree, TreeNode};
pub use crate::types::{MatchError, MatchStrategy, SimilarityVector};
