//! Batch evaluation of a fusion strategy against labeled similarity data.

use std::time::Instant;

use matcher::{Decider, MatchStrategy, SimilarityVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::confusion::ConfusionMatrix;
use crate::error::EvalError;
use crate::report::{derive_metrics, MetricsReport};

/// Samples per worker accumulator in the parallel path.
const PARALLEL_CHUNK: usize = 256;

/// One labeled record: the four precomputed similarities for an image pair
/// plus its ground-truth label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LabeledSample {
    /// Per-kind similarity scores for the pair.
    pub similarities: SimilarityVector,
    /// Ground truth: true when the pair is a near-duplicate.
    pub is_matching: bool,
}

impl LabeledSample {
    /// Build from a dataset row. The value order is significant and must be
    /// the canonical kind order: dhash, phash, whash, nmfhash.
    pub fn from_row(values: [f64; 4], is_matching: bool) -> Self {
        Self {
            similarities: SimilarityVector::from_row(values),
            is_matching,
        }
    }
}

/// Result of one evaluation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// Accumulated verdict counts.
    pub confusion: ConfusionMatrix,
    /// Metrics derived from the counts.
    pub report: MetricsReport,
}

/// Run `strategy` over every sample, accumulating a confusion matrix.
pub fn run_strategy(
    samples: &[LabeledSample],
    decider: &Decider,
    strategy: &MatchStrategy,
) -> Result<ConfusionMatrix, EvalError> {
    let start = Instant::now();
    let mut confusion = ConfusionMatrix::new();
    for sample in samples {
        let predicted = match decider.decide(strategy, &sample.similarities) {
            Ok(verdict) => verdict,
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros() as u64;
                warn!(
                    error = %err,
                    strategy = strategy.label(),
                    processed = confusion.total(),
                    elapsed_micros,
                    "evaluation_failure"
                );
                return Err(err.into());
            }
        };
        confusion.record(predicted, sample.is_matching);
    }

    let elapsed_micros = start.elapsed().as_micros() as u64;
    info!(
        samples = samples.len(),
        strategy = strategy.label(),
        elapsed_micros,
        "evaluation_complete"
    );
    Ok(confusion)
}

/// Parallel variant of [`run_strategy`]: one accumulator per worker chunk,
/// merged afterward. The accumulators themselves stay lock-free.
pub fn run_strategy_parallel(
    samples: &[LabeledSample],
    decider: &Decider,
    strategy: &MatchStrategy,
) -> Result<ConfusionMatrix, EvalError> {
    let start = Instant::now();
    let confusion = samples
        .par_chunks(PARALLEL_CHUNK)
        .map(|chunk| {
            let mut local = ConfusionMatrix::new();
            for sample in chunk {
                let predicted = decider.decide(strategy, &sample.similarities)?;
                local.record(predicted, sample.is_matching);
            }
            Ok(local)
        })
        .try_reduce(ConfusionMatrix::new, |mut left, right| {
            left.merge(&right);
            Ok(left)
        });

    let elapsed_micros = start.elapsed().as_micros() as u64;
    match confusion {
        Ok(confusion) => {
            info!(
                samples = samples.len(),
                strategy = strategy.label(),
                elapsed_micros,
                "evaluation_complete"
            );
            Ok(confusion)
        }
        Err(err) => {
            warn!(
                error = %err,
                strategy = strategy.label(),
                elapsed_micros,
                "evaluation_failure"
            );
            Err(err)
        }
    }
}

/// Run a strategy and derive its metrics in one step.
pub fn evaluate(
    samples: &[LabeledSample],
    decider: &Decider,
    strategy: &MatchStrategy,
) -> Result<Evaluation, EvalError> {
    let confusion = run_strategy(samples, decider, strategy)?;
    let report = derive_metrics(&confusion)?;
    Ok(Evaluation { confusion, report })
}

#[cfg(test)]
mod tests {
    use super::*;

    use fingerprint::HashKind;

    // Matching pair under the tuned tree: dhash <= 0.334, whash <= 0.277.
    fn matching_row() -> [f64; 4] {
        [0.1, 0.2, 0.1, 0.99]
    }

    // Non-matching pair: dhash > 0.334, nmfhash <= 0.976, phash > 0.347.
    fn non_matching_row() -> [f64; 4] {
        [0.6, 0.7, 0.5, 0.3]
    }

    fn labeled_batch() -> Vec<LabeledSample> {
        vec![
            LabeledSample::from_row(matching_row(), true),
            LabeledSample::from_row(matching_row(), true),
            LabeledSample::from_row(non_matching_row(), false),
            // Mislabeled on purpose so every quadrant is exercised.
            LabeledSample::from_row(matching_row(), false),
            LabeledSample::from_row(non_matching_row(), true),
        ]
    }

    #[test]
    fn from_row_preserves_column_order() {
        let sample = LabeledSample::from_row([0.1, 0.2, 0.3, 0.4], true);
        assert_eq!(sample.similarities.get(HashKind::Dhash), Some(0.1));
        assert_eq!(sample.similarities.get(HashKind::Nmfhash), Some(0.4));
        assert!(sample.is_matching);
    }

    #[test]
    fn run_strategy_fills_all_quadrants() {
        let decider = Decider::default();
        let confusion = run_strategy(
            &labeled_batch(),
            &decider,
            &MatchStrategy::DecisionTree,
        )
        .unwrap();

        assert_eq!(confusion.true_positives, 2);
        assert_eq!(confusion.true_negatives, 1);
        assert_eq!(confusion.false_positives, 1);
        assert_eq!(confusion.false_negatives, 1);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let decider = Decider::default();
        let samples: Vec<LabeledSample> = (0..1000)
            .map(|i| {
                if i % 3 == 0 {
                    LabeledSample::from_row(matching_row(), true)
                } else {
                    LabeledSample::from_row(non_matching_row(), i % 7 == 0)
                }
            })
            .collect();

        for strategy in [MatchStrategy::default_majority(), MatchStrategy::DecisionTree] {
            let sequential = run_strategy(&samples, &decider, &strategy).unwrap();
            let parallel = run_strategy_parallel(&samples, &decider, &strategy).unwrap();
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn run_strategy_surfaces_decision_errors() {
        let decider = Decider::default();
        let mut bad = LabeledSample::from_row(matching_row(), true);
        bad.similarities.whash = None;
        let err = run_strategy(&[bad], &decider, &MatchStrategy::DecisionTree)
            .expect_err("incomplete vector");
        assert!(matches!(err, EvalError::Match(_)));
    }

    #[test]
    fn evaluate_composes_counts_and_metrics() {
        let decider = Decider::default();
        let evaluation =
            evaluate(&labeled_batch(), &decider, &MatchStrategy::DecisionTree).unwrap();
        assert_eq!(evaluation.confusion.total(), 5);
        assert!((evaluation.report.accuracy - 0.6).abs() < 1e-12);
    }

    #[test]
    fn evaluate_reports_undefined_metric_batches() {
        let decider = Decider::default();
        // Every prediction is negative: precision_pos has a zero denominator.
        let samples = vec![
            LabeledSample::from_row(non_matching_row(), false),
            LabeledSample::from_row(non_matching_row(), true),
        ];
        let err = evaluate(&samples, &decider, &MatchStrategy::DecisionTree)
            .expect_err("undefined");
        assert_eq!(
            err,
            EvalError::UndefinedMetric {
                metric: "precision_pos",
                denominator: "TP+FP",
            }
        );
    }

    #[test]
    fn labeled_sample_serde_roundtrip() {
        let sample = LabeledSample::from_row([0.1, 0.2, 0.3, 0.4], false);
        let json = serde_json::to_string(&sample).unwrap();
        let back: LabeledSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }
}
