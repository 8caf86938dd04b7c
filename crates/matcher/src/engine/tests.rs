use super::*;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::metrics::{set_decision_metrics, DecisionMetrics};
use crate::tree::TreeNode;

fn sims(dhash: f64, phash: f64, whash: f64, nmfhash: f64) -> SimilarityVector {
    SimilarityVector::from_parts(dhash, phash, whash, nmfhash)
}

#[test]
fn single_match_uses_the_kind_verdict() {
    let decider = Decider::default();
    // dhash 0.1 < 0.334.
    assert!(decider
        .single_match(HashKind::Dhash, &sims(0.1, 0.9, 0.9, 0.0))
        .unwrap());
    // nmfhash 0.9 <= 0.952.
    assert!(!decider
        .single_match(HashKind::Nmfhash, &sims(0.1, 0.9, 0.9, 0.9))
        .unwrap());
}

#[test]
fn single_match_requires_the_entry() {
    let decider = Decider::default();
    let mut partial = SimilarityVector::default();
    partial.set(HashKind::Dhash, 0.1);
    assert_eq!(
        decider.single_match(HashKind::Phash, &partial),
        Err(MatchError::IncompleteSimilarityVector {
            kind: HashKind::Phash
        })
    );
}

#[test]
fn majority_above_tie_is_a_match() {
    let decider = Decider::default();
    // phash, whash, nmfhash match; dhash does not. 3 > 2.
    let verdict = decider
        .majority_match(&sims(0.5, 0.1, 0.1, 0.99), 2)
        .unwrap();
    assert!(verdict);
}

#[test]
fn majority_below_tie_is_no_match() {
    let decider = Decider::default();
    // Only dhash matches. 1 < 2, so even the tie-break signal loses.
    let verdict = decider
        .majority_match(&sims(0.1, 0.9, 0.9, 0.5), 2)
        .unwrap();
    assert!(!verdict);
}

#[test]
fn majority_tie_falls_to_dhash_negative() {
    let decider = Decider::default();
    // phash and whash match, dhash and nmfhash do not: exactly 2 of 4,
    // and dhash's own verdict is false.
    let verdict = decider
        .majority_match(&sims(0.5, 0.1, 0.1, 0.5), 2)
        .unwrap();
    assert!(!verdict);
}

#[test]
fn majority_tie_falls_to_dhash_positive() {
    let decider = Decider::default();
    // dhash and phash match, whash and nmfhash do not: exactly 2 of 4,
    // and dhash's own verdict is true.
    let verdict = decider
        .majority_match(&sims(0.1, 0.1, 0.9, 0.5), 2)
        .unwrap();
    assert!(verdict);
}

#[test]
fn majority_tie_at_zero_uses_dhash() {
    let decider = Decider::default();
    // Nothing matches: 0 == 0, dhash verdict false.
    assert!(!decider
        .majority_match(&sims(0.9, 0.9, 0.9, 0.5), 0)
        .unwrap());
    // One match above the zero tie.
    assert!(decider
        .majority_match(&sims(0.9, 0.1, 0.9, 0.5), 0)
        .unwrap());
}

#[test]
fn majority_rejects_out_of_range_tie() {
    let decider = Decider::default();
    for tie in [4, 5, 100] {
        assert_eq!(
            decider.majority_match(&sims(0.1, 0.1, 0.1, 0.99), tie),
            Err(MatchError::InvalidThreshold {
                value: tie,
                limit: 4
            })
        );
    }
}

#[test]
fn majority_rejects_incomplete_vector() {
    let decider = Decider::default();
    let mut partial = sims(0.1, 0.1, 0.1, 0.99);
    partial.nmfhash = None;
    assert_eq!(
        decider.majority_match(&partial, 2),
        Err(MatchError::IncompleteSimilarityVector {
            kind: HashKind::Nmfhash
        })
    );
}

#[test]
fn majority_respects_reconfigured_thresholds() {
    let mut decider = Decider::default();
    let loose = ThresholdConfig::default()
        .with_threshold(HashKind::Dhash, 0.9)
        .with_threshold(HashKind::Phash, 0.9)
        .with_threshold(HashKind::Whash, 0.9);
    decider.set_thresholds(loose);
    // 0.5 similarities now clear three thresholds.
    assert!(decider.majority_match(&sims(0.5, 0.5, 0.5, 0.5), 2).unwrap());
}

#[test]
fn decide_dispatches_per_strategy() {
    let decider = Decider::default();
    let pair = sims(0.2, 0.5, 0.1, 0.5);

    let single = MatchStrategy::Single {
        kind: HashKind::Dhash,
    };
    assert_eq!(
        decider.decide(&single, &pair).unwrap(),
        decider.single_match(HashKind::Dhash, &pair).unwrap()
    );

    let majority = MatchStrategy::Majority { tie_threshold: 2 };
    assert_eq!(
        decider.decide(&majority, &pair).unwrap(),
        decider.majority_match(&pair, 2).unwrap()
    );

    assert_eq!(
        decider.decide(&MatchStrategy::DecisionTree, &pair).unwrap(),
        decider.tree_match(&pair).unwrap()
    );
}

#[test]
fn decide_is_idempotent() {
    let decider = Decider::default();
    let pair = sims(0.5, 0.5, 0.1, 0.9);
    for strategy in [
        MatchStrategy::Single {
            kind: HashKind::Whash,
        },
        MatchStrategy::default_majority(),
        MatchStrategy::DecisionTree,
    ] {
        let first = decider.decide(&strategy, &pair).unwrap();
        let second = decider.decide(&strategy, &pair).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn with_tree_replaces_the_topology() {
    let always_yes = crate::tree::DecisionTree::new(vec![TreeNode::Leaf { verdict: true }])
        .expect("single leaf is a valid tree");
    let decider = Decider::default().with_tree(always_yes);
    assert!(decider.tree_match(&sims(0.9, 0.9, 0.9, 0.0)).unwrap());
}

struct RecordingMetrics {
    events: Mutex<Vec<(String, bool)>>,
}

impl DecisionMetrics for RecordingMetrics {
    fn record_decision(&self, strategy: &str, verdict: bool, _latency: Duration) {
        self.events
            .lock()
            .expect("metrics mutex poisoned")
            .push((strategy.to_string(), verdict));
    }
}

#[test]
fn decide_reports_to_installed_metrics() {
    let recorder = Arc::new(RecordingMetrics {
        events: Mutex::new(Vec::new()),
    });
    set_decision_metrics(Some(recorder.clone()));

    let decider = Decider::default();
    let verdict = decider
        .decide(&MatchStrategy::DecisionTree, &sims(0.2, 0.5, 0.1, 0.5))
        .unwrap();
    assert!(verdict);

    set_decision_metrics(None);

    let events = recorder.events.lock().expect("metrics mutex poisoned");
    assert!(events.contains(&("decision_tree".to_string(), true)));
}
