//! Error types produced by the evaluation crate.

use matcher::MatchError;
use thiserror::Error;

/// Errors produced while evaluating a fusion strategy against labeled data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// A confusion-matrix metric's denominator is zero. The message names
    /// the metric and the empty denominator, e.g.
    /// `precision_pos undefined: TP+FP=0` — a batch with zero positive
    /// predictions is a legitimate, informative edge case.
    #[error("{metric} undefined: {denominator}=0")]
    UndefinedMetric {
        metric: &'static str,
        denominator: &'static str,
    },

    /// A decision failed while running the strategy over a sample.
    #[error(transparent)]
    Match(#[from] MatchError),
}
