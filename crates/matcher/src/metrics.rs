// Metrics hooks for the matcher crate.
//
// Callers install a global `DecisionMetrics` implementation via
// [`set_decision_metrics`], then `Decider` reports strategy, verdict, and
// latency for each call to [`Decider::decide`]. This keeps instrumentation
// decoupled from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for fusion decisions.
pub trait DecisionMetrics: Send + Sync {
    /// Record the outcome of one decision.
    ///
    /// `strategy` is the stable strategy label, `verdict` the boolean match
    /// result, and `latency` the wall-clock duration of the decision.
    fn record_decision(&self, strategy: &str, verdict: bool, latency: Duration);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DecisionMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn DecisionMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn DecisionMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global decision metrics recorder.
///
/// This is typically called once during service startup so all `Decider`
/// instances share the same metrics backend.
pub fn set_decision_metrics(recorder: Option<Arc<dyn DecisionMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("decision metrics lock poisoned");
    *guard = recorder;
}
