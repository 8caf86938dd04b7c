//! Metric derivation from an accumulated confusion matrix.

use serde::{Deserialize, Serialize};

use crate::confusion::ConfusionMatrix;
use crate::error::EvalError;

/// Classification-quality metrics for both classes.
///
/// Computed values only; rendering is the caller's concern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    /// Overall effectiveness across both classes.
    pub accuracy: f64,
    /// How many predicted positives are actually positive.
    pub precision_pos: f64,
    /// How many predicted negatives are actually negative.
    pub precision_neg: f64,
    /// How many actual positives were identified.
    pub recall_pos: f64,
    /// How many actual negatives were identified.
    pub recall_neg: f64,
    /// Harmonic balance of positive precision and recall.
    pub f1_pos: f64,
    /// Harmonic balance of negative precision and recall.
    pub f1_neg: f64,
}

fn guarded(
    numerator: f64,
    denominator: f64,
    metric: &'static str,
    denominator_name: &'static str,
) -> Result<f64, EvalError> {
    if denominator == 0.0 {
        return Err(EvalError::UndefinedMetric {
            metric,
            denominator: denominator_name,
        });
    }
    Ok(numerator / denominator)
}

/// Derive all seven metrics, failing with a named [`EvalError::UndefinedMetric`]
/// whenever a denominator is zero rather than producing NaN.
pub fn derive_metrics(confusion: &ConfusionMatrix) -> Result<MetricsReport, EvalError> {
    let tp = confusion.true_positives as f64;
    let tn = confusion.true_negatives as f64;
    let fp = confusion.false_positives as f64;
    let fne = confusion.false_negatives as f64;

    let accuracy = guarded(tp + tn, tp + tn + fp + fne, "accuracy", "TP+TN+FP+FN")?;

    let precision_pos = guarded(tp, tp + fp, "precision_pos", "TP+FP")?;
    let precision_neg = guarded(tn, tn + fne, "precision_neg", "TN+FN")?;

    let recall_pos = guarded(tp, tp + fne, "recall_pos", "TP+FN")?;
    let recall_neg = guarded(tn, tn + fp, "recall_neg", "TN+FP")?;

    let f1_pos = guarded(
        2.0 * precision_pos * recall_pos,
        precision_pos + recall_pos,
        "f1_pos",
        "precision_pos+recall_pos",
    )?;
    let f1_neg = guarded(
        2.0 * precision_neg * recall_neg,
        precision_neg + recall_neg,
        "f1_neg",
        "precision_neg+recall_neg",
    )?;

    Ok(MetricsReport {
        accuracy,
        precision_pos,
        precision_neg,
        recall_pos,
        recall_neg,
        f1_pos,
        f1_neg,
    })
}
