//! Property tests for the alignment engine.
//!
//! Scores are checked against straightforward full DPs (one matrix for linear
//! gaps, three for affine gaps), and the recovered paths are checked for
//! consistency with their inputs.

use domain_aligner::alignment::{AlignmentConfig, AlignmentEngine, LabelScorer, ScoringWeights};
use domain_aligner::core::types::AlignedLabel;
use domain_aligner::Label;
use proptest::prelude::*;

const POOL: &[&str] = &[
    "0", "0", "A", "A.B", "A.B.C", "A.B.C.D", "A.B.X.Y", "A.B.C.E", "A.C", "Z.B.C.D",
];

fn labels() -> impl Strategy<Value = Vec<Label>> {
    prop::collection::vec(prop::sample::select(POOL), 0..8).prop_map(|codes| {
        codes
            .into_iter()
            .map(|code| Label::parse(code).unwrap())
            .collect()
    })
}

fn full_linear_score(s1: &[Label], s2: &[Label], scorer: &LabelScorer, gap: i32) -> i32 {
    let n1 = s1.len();
    let n2 = s2.len();
    let mut dp = vec![vec![0i32; n1 + 1]; n2 + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = gap * i as i32;
    }
    for j in 0..=n1 {
        dp[0][j] = gap * j as i32;
    }
    for i in 1..=n2 {
        for j in 1..=n1 {
            let diag = dp[i - 1][j - 1] + scorer.score(&s2[i - 1], &s1[j - 1]);
            let up = dp[i - 1][j] + gap;
            let left = dp[i][j - 1] + gap;
            dp[i][j] = diag.max(up).max(left);
        }
    }
    dp[n2][n1]
}

/// Three-matrix affine reference. Row 0 and column 0 charge the opening
/// penalty for every step.
fn full_affine_score(
    s1: &[Label],
    s2: &[Label],
    scorer: &LabelScorer,
    open: i64,
    extend: i64,
) -> i64 {
    const NONE: i64 = i64::MIN / 4;
    let n1 = s1.len();
    let n2 = s2.len();
    let mut m = vec![vec![NONE; n1 + 1]; n2 + 1];
    let mut x = vec![vec![NONE; n1 + 1]; n2 + 1];
    let mut y = vec![vec![NONE; n1 + 1]; n2 + 1];
    m[0][0] = 0;
    for j in 1..=n1 {
        x[0][j] = open * j as i64;
    }
    for i in 1..=n2 {
        y[i][0] = open * i as i64;
    }
    for i in 1..=n2 {
        for j in 1..=n1 {
            let before = m[i - 1][j - 1].max(x[i - 1][j - 1]).max(y[i - 1][j - 1]);
            m[i][j] = before + i64::from(scorer.score(&s2[i - 1], &s1[j - 1]));
            x[i][j] = (m[i][j - 1] + open)
                .max(x[i][j - 1] + extend)
                .max(y[i][j - 1] + open);
            y[i][j] = (m[i - 1][j] + open)
                .max(x[i - 1][j] + open)
                .max(y[i - 1][j] + extend);
        }
    }
    m[n2][n1].max(x[n2][n1]).max(y[n2][n1])
}

fn strip_gaps(stream: &[AlignedLabel]) -> Vec<Label> {
    stream
        .iter()
        .filter_map(|item| match item {
            AlignedLabel::Gap => None,
            AlignedLabel::Label(label) => Some(label.clone()),
        })
        .collect()
}

fn linear_engine() -> AlignmentEngine {
    AlignmentEngine::new(&AlignmentConfig::default())
}

fn affine_engine() -> AlignmentEngine {
    AlignmentEngine::new(&AlignmentConfig::default().with_affine(true))
}

proptest! {
    #[test]
    fn linear_matches_full(s1 in labels(), s2 in labels()) {
        let engine = linear_engine();
        let path = engine.align_labels(&s1, &s2).unwrap();
        prop_assert_eq!(path.raw_score, full_linear_score(&s1, &s2, engine.scorer(), -2));
    }

    #[test]
    fn linear_score_is_symmetric(s1 in labels(), s2 in labels()) {
        let engine = linear_engine();
        let forward = engine.align_labels(&s1, &s2).unwrap();
        let reverse = engine.align_labels(&s2, &s1).unwrap();
        prop_assert_eq!(forward.raw_score, reverse.raw_score);
    }

    #[test]
    fn affine_matches_full(s1 in labels(), s2 in labels()) {
        let engine = affine_engine();
        let path = engine.align_labels(&s1, &s2).unwrap();
        prop_assert_eq!(
            i64::from(path.raw_score),
            full_affine_score(&s1, &s2, engine.scorer(), -2, -1)
        );
    }

    #[test]
    fn affine_score_is_symmetric(s1 in labels(), s2 in labels()) {
        let engine = affine_engine();
        let forward = engine.align_labels(&s1, &s2).unwrap();
        let reverse = engine.align_labels(&s2, &s1).unwrap();
        prop_assert_eq!(forward.raw_score, reverse.raw_score);
    }

    #[test]
    fn affine_score_is_sum_of_columns(s1 in labels(), s2 in labels()) {
        let engine = affine_engine();
        let path = engine.align_labels(&s1, &s2).unwrap();

        // (gap in aligned1, gap in aligned2) per column
        let kinds: Vec<(bool, bool)> = path
            .aligned1
            .iter()
            .zip(&path.aligned2)
            .map(|(a, b)| (a.is_gap(), b.is_gap()))
            .collect();
        let leading = kinds
            .iter()
            .take_while(|kind| **kind != (false, false) && **kind == kinds[0])
            .count();

        let mut total = 0;
        for (k, (a, b)) in path.aligned1.iter().zip(&path.aligned2).enumerate() {
            total += match (a, b) {
                (AlignedLabel::Label(a), AlignedLabel::Label(b)) => engine.scorer().score(b, a),
                _ if k >= leading && k > 0 && kinds[k - 1] == kinds[k] => -1,
                _ => -2,
            };
        }
        prop_assert_eq!(path.raw_score, total);
    }

    #[test]
    fn linear_score_is_sum_of_columns(s1 in labels(), s2 in labels()) {
        let engine = linear_engine();
        let path = engine.align_labels(&s1, &s2).unwrap();
        let total: i32 = path
            .aligned1
            .iter()
            .zip(&path.aligned2)
            .map(|(a, b)| match (a, b) {
                (AlignedLabel::Label(a), AlignedLabel::Label(b)) => engine.scorer().score(b, a),
                _ => -2,
            })
            .sum();
        prop_assert_eq!(path.raw_score, total);
    }

    #[test]
    fn paths_preserve_inputs(s1 in labels(), s2 in labels(), affine in any::<bool>()) {
        let engine = if affine { affine_engine() } else { linear_engine() };
        let path = engine.align_labels(&s1, &s2).unwrap();

        prop_assert_eq!(path.aligned1.len(), path.aligned2.len());
        prop_assert!(path.len() >= s1.len().max(s2.len()));
        prop_assert!(path.len() <= s1.len() + s2.len());
        prop_assert_eq!(path.diag_steps + path.left_steps + path.up_steps, path.len());
        prop_assert_eq!(path.diag_steps + path.left_steps, s1.len());
        prop_assert_eq!(path.diag_steps + path.up_steps, s2.len());
        prop_assert!(path.zero_zero_matches <= path.diag_steps);
        prop_assert_eq!(strip_gaps(&path.aligned1), s1);
        prop_assert_eq!(strip_gaps(&path.aligned2), s2);

        // no column pairs two gaps
        prop_assert!(path
            .aligned1
            .iter()
            .zip(&path.aligned2)
            .all(|(a, b)| !(a.is_gap() && b.is_gap())));
    }

    #[test]
    fn affine_never_scores_below_linear(s1 in labels(), s2 in labels()) {
        let linear = linear_engine().align_labels(&s1, &s2).unwrap();
        let affine = affine_engine().align_labels(&s1, &s2).unwrap();
        prop_assert!(affine.raw_score >= linear.raw_score);
    }

    #[test]
    fn self_alignment_is_diagonal(s in labels(), affine in any::<bool>()) {
        let engine = if affine { affine_engine() } else { linear_engine() };
        let path = engine.align_labels(&s, &s).unwrap();

        let weights = ScoringWeights::default();
        let expected: i32 = s
            .iter()
            .map(|label| if label.is_unlabeled() { weights.no_label } else { weights.full_match })
            .sum();

        prop_assert_eq!(path.diag_steps, s.len());
        prop_assert_eq!(path.left_steps + path.up_steps, 0);
        prop_assert_eq!(path.raw_score, expected);
        prop_assert_eq!(
            path.zero_zero_matches,
            s.iter().filter(|label| label.is_unlabeled()).count()
        );
    }

    #[test]
    fn alignment_against_empty_is_all_gaps(s in labels(), affine in any::<bool>()) {
        let engine = if affine { affine_engine() } else { linear_engine() };
        let path = engine.align_labels(&s, &[]).unwrap();

        prop_assert_eq!(path.left_steps, s.len());
        prop_assert_eq!(path.raw_score, -2 * s.len() as i32);
        prop_assert!(path.aligned2.iter().all(AlignedLabel::is_gap));
    }
}

#[test]
fn worked_example() {
    let a = Label::parse("A.B.C.D").unwrap();
    let b = Label::parse("A.B.X.Y").unwrap();
    let zero = Label::parse("0").unwrap();

    let path = linear_engine()
        .align_labels(&[a.clone(), zero], &[a, b])
        .unwrap();
    assert_eq!(path.raw_score, 7);
    assert_eq!(path.len(), 2);
    assert_eq!(path.zero_zero_matches, 0);
}

#[test]
fn unequal_lengths_open_gaps() {
    let seq = |codes: &[&str]| -> Vec<Label> {
        codes.iter().map(|code| Label::parse(code).unwrap()).collect()
    };

    let linear = linear_engine()
        .align_labels(&seq(&["A", "X", "Y", "Z", "B"]), &seq(&["A", "B"]))
        .unwrap();
    assert_eq!(linear.raw_score, 10);

    let affine = affine_engine()
        .align_labels(&seq(&["A", "X", "Y", "Z", "B"]), &seq(&["A", "B"]))
        .unwrap();
    assert_eq!(affine.raw_score, 12);
}
