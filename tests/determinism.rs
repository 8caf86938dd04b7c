//! Idempotence guarantees: identical inputs always produce identical
//! outputs, with no hidden state advancing between calls.

use neardup::{
    derive_metrics, evaluate, is_match, similarity, ConfusionMatrix, Decider, Fingerprint,
    HashKind, LabeledSample, MatchStrategy, SimilarityVector, ThresholdConfig,
};

fn sample_pair() -> (Fingerprint, Fingerprint) {
    let a = Fingerprint::parse(HashKind::Dhash, &"a5".repeat(32)).unwrap();
    let b = Fingerprint::parse(HashKind::Dhash, &"5a".repeat(32)).unwrap();
    (a, b)
}

#[test]
fn similarity_is_idempotent() {
    let (a, b) = sample_pair();
    let first = similarity(HashKind::Dhash, &a, &b).unwrap();
    for _ in 0..10 {
        assert_eq!(similarity(HashKind::Dhash, &a, &b).unwrap(), first);
    }
}

#[test]
fn is_match_is_idempotent() {
    let thresholds = ThresholdConfig::default();
    let first = is_match(HashKind::Nmfhash, 0.96, &thresholds).unwrap();
    for _ in 0..10 {
        assert_eq!(is_match(HashKind::Nmfhash, 0.96, &thresholds).unwrap(), first);
    }
}

#[test]
fn decisions_are_idempotent() {
    let decider = Decider::default();
    let sims = SimilarityVector::from_parts(0.3, 0.35, 0.15, 0.96);
    for strategy in [
        MatchStrategy::Single {
            kind: HashKind::Whash,
        },
        MatchStrategy::Majority { tie_threshold: 1 },
        MatchStrategy::default_majority(),
        MatchStrategy::DecisionTree,
    ] {
        let first = decider.decide(&strategy, &sims).unwrap();
        for _ in 0..10 {
            assert_eq!(decider.decide(&strategy, &sims).unwrap(), first);
        }
    }
}

#[test]
fn evaluation_is_idempotent() {
    let samples: Vec<LabeledSample> = (0..100)
        .map(|i| {
            let t = i as f64 / 100.0;
            LabeledSample::from_row([t, 1.0 - t, t / 2.0, 1.0 - t / 2.0], i % 2 == 0)
        })
        .collect();

    let decider = Decider::default();
    let first = evaluate(&samples, &decider, &MatchStrategy::DecisionTree).unwrap();
    let second = evaluate(&samples, &decider, &MatchStrategy::DecisionTree).unwrap();
    assert_eq!(first.confusion, second.confusion);
    assert_eq!(first.report, second.report);
}

#[test]
fn metric_derivation_is_idempotent() {
    let confusion = ConfusionMatrix {
        true_positives: 8,
        true_negatives: 7,
        false_positives: 2,
        false_negatives: 3,
    };
    assert_eq!(
        derive_metrics(&confusion).unwrap(),
        derive_metrics(&confusion).unwrap()
    );
}

#[test]
fn fingerprint_string_codec_is_stable() {
    let hex = "deadbeefdeadbeef";
    let fp = Fingerprint::parse(HashKind::Phash, hex).unwrap();
    assert_eq!(fp.to_string(), hex);
    let again = Fingerprint::parse(HashKind::Phash, &fp.to_string()).unwrap();
    assert_eq!(again, fp);
}
