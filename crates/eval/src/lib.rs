//! Evaluation harness for multi-hash fusion strategies.
//!
//! Scores a fusion strategy's classification quality against labeled
//! similarity data: run the strategy over every record, accumulate a
//! confusion matrix, derive accuracy/precision/recall/F1 for both classes.
//!
//! ## What we do here
//!
//! - **Accumulate** - [`ConfusionMatrix`] counts verdicts against ground
//!   truth; accumulators merge, they never lock
//! - **Derive** - [`derive_metrics`] computes the seven quality metrics,
//!   failing with a named [`EvalError::UndefinedMetric`] on any zero
//!   denominator instead of producing NaN
//! - **Run** - [`run_strategy`] / [`run_strategy_parallel`] drive a
//!   [`matcher::Decider`] over a labeled batch; the parallel path keeps one
//!   accumulator per worker and merges afterward
//!
//! ## Example
//!
//! ```
//! use eval::{evaluate, LabeledSample};
//! use matcher::{Decider, MatchStrategy};
//!
//! // Column order: dhash, phash, whash, nmfhash.
//! let samples = vec![
//!     LabeledSample::from_row([0.1, 0.2, 0.1, 0.99], true),
//!     LabeledSample::from_row([0.6, 0.7, 0.5, 0.30], false),
//! ];
//!
//! let decider = Decider::default();
//! let evaluation = evaluate(&samples, &decider, &MatchStrategy::DecisionTree).unwrap();
//! assert_eq!(evaluation.confusion.true_positives, 1);
//! assert_eq!(evaluation.report.accuracy, 1.0);
//! ```

mod confusion;
mod error;
mod harness;
mod report;

pub use crate::confusion::ConfusionMatrix;
pub use crate::error::EvalError;
pub use crate::harness::{
    evaluate, run_strategy, run_strategy_parallel, Evaluation, LabeledSample,
};
pub use crate::report::{derive_metrics, MetricsReport};
