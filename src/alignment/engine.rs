use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::alignment::fill::{fill, GapModel};
use crate::alignment::scoring::{LabelScorer, ScoringWeights};
use crate::alignment::traceback::{traceback, Traceback};
use crate::core::label::Label;
use crate::core::sequence::LabeledSequence;
use crate::core::types::AlignedLabel;

/// Default penalty for opening a gap
pub const PENALTY_GAP_OPEN: i32 = -2;

/// Default penalty for extending a gap (affine mode only)
pub const PENALTY_GAP_EXTEND: i32 = -1;

/// Number of values in an ordered score override
pub const ORDERED_SCORE_COUNT: usize = 9;

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Cannot allocate alignment matrix of {rows} x {cols} cells")]
    Allocation { rows: usize, cols: usize },

    #[error("No protein domain found in alignment: every aligned position is unlabeled")]
    NoDomainInAlignment,

    #[error("Traceback reached cell ({row}, {col}) with no valid move")]
    InconsistentTraceback { row: usize, col: usize },

    #[error("Alignment score at cell ({row}, {col}) does not fit in a 32-bit integer")]
    ScoreOverflow { row: usize, col: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected {ORDERED_SCORE_COUNT} score values, got {0}")]
    ScoreCount(usize),
}

/// Parameters of the alignment engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Label scoring weights
    pub weights: ScoringWeights,

    /// Penalty for opening a gap, also used for every gap step in simple mode
    pub gap_open: i32,

    /// Penalty for continuing a gap run, only used when `affine` is set
    pub gap_extend: i32,

    /// Distinguish gap openings from gap extensions
    pub affine: bool,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            gap_open: PENALTY_GAP_OPEN,
            gap_extend: PENALTY_GAP_EXTEND,
            affine: false,
        }
    }
}

impl AlignmentConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read or
    /// `ConfigError::Json` if it is not a valid configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Override weights and gap penalties from nine ordered values:
    /// full match, group 3 match, group 2 match, group 1 match, unlabeled
    /// pair, different labels, label vs unlabeled, gap open, gap extend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ScoreCount` unless exactly nine values are given.
    pub fn with_ordered_scores(mut self, values: &[i32]) -> Result<Self, ConfigError> {
        let &[full, group3, group2, group1, no_label, different, vs_none, open, extend] = values
        else {
            return Err(ConfigError::ScoreCount(values.len()));
        };

        self.weights = ScoringWeights {
            full_match: full,
            group3_match: group3,
            group2_match: group2,
            group1_match: group1,
            no_label,
            different_labels: different,
            label_vs_none: vs_none,
        };
        self.gap_open = open;
        self.gap_extend = extend;
        Ok(self)
    }

    #[must_use]
    pub fn with_affine(mut self, affine: bool) -> Self {
        self.affine = affine;
        self
    }

    pub fn gap_model(&self) -> GapModel {
        if self.affine {
            GapModel::Affine {
                open: self.gap_open,
                extend: self.gap_extend,
            }
        } else {
            GapModel::Linear {
                open: self.gap_open,
            }
        }
    }
}

/// Result of aligning two labeled sequences
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentResult {
    pub name1: String,
    pub name2: String,

    /// Sequence 1 with gaps inserted
    pub aligned1: Vec<AlignedLabel>,

    /// Sequence 2 with gaps inserted, same length as `aligned1`
    pub aligned2: Vec<AlignedLabel>,

    pub raw_score: i32,

    /// Number of alignment columns, gaps included
    pub length: usize,

    /// Columns where both sequences are unlabeled
    pub zero_zero_matches: usize,

    /// `raw_score / (length - zero_zero_matches)`
    pub normalized_score: f64,
}

/// Global aligner for labeled sequences
#[derive(Debug, Clone)]
pub struct AlignmentEngine {
    scorer: LabelScorer,
    gaps: GapModel,
}

impl AlignmentEngine {
    #[must_use]
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            scorer: LabelScorer::new(config.weights),
            gaps: config.gap_model(),
        }
    }

    pub fn gap_model(&self) -> GapModel {
        self.gaps
    }

    pub fn scorer(&self) -> &LabelScorer {
        &self.scorer
    }

    /// Align two named sequences. Sequence 1 runs along the matrix columns,
    /// sequence 2 along the rows.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::NoDomainInAlignment` when every aligned column is
    /// an unlabeled pair (including two empty sequences), `ScoreOverflow` when
    /// a cell value leaves the `i32` range, or an allocation or consistency
    /// error from the matrix stages.
    pub fn align(
        &self,
        seq1: &LabeledSequence,
        seq2: &LabeledSequence,
    ) -> Result<AlignmentResult, AlignError> {
        let path = self.align_labels(&seq1.labels, &seq2.labels)?;
        let length = path.len();
        let raw_score = path.raw_score;
        let normalized_score = normalize(raw_score, length, path.zero_zero_matches)?;

        debug!(
            seq1 = %seq1.name,
            seq2 = %seq2.name,
            raw_score,
            length,
            normalized_score,
            "Aligned pair"
        );

        Ok(AlignmentResult {
            name1: seq1.name.clone(),
            name2: seq2.name.clone(),
            aligned1: path.aligned1,
            aligned2: path.aligned2,
            raw_score,
            length,
            zero_zero_matches: path.zero_zero_matches,
            normalized_score,
        })
    }

    /// Fill and trace back two label slices without normalizing the score.
    ///
    /// # Errors
    ///
    /// Returns an allocation or consistency error from the matrix stages.
    pub fn align_labels(&self, seq1: &[Label], seq2: &[Label]) -> Result<Traceback, AlignError> {
        let dp = fill(seq1, seq2, &self.scorer, self.gaps)?;
        traceback(&dp, seq1, seq2)
    }
}

/// Divide the raw score by the number of columns that are not unlabeled
/// pairs.
///
/// # Errors
///
/// Returns `AlignError::NoDomainInAlignment` if no such column exists.
pub fn normalize(
    raw_score: i32,
    length: usize,
    zero_zero_matches: usize,
) -> Result<f64, AlignError> {
    let informative = length.saturating_sub(zero_zero_matches);
    if informative == 0 {
        return Err(AlignError::NoDomainInAlignment);
    }
    #[allow(clippy::cast_precision_loss)]
    let informative = informative as f64;
    Ok(f64::from(raw_score) / informative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::label::parse_label_list;
    use crate::core::types::join_aligned;

    fn seq(name: &str, labels: &str) -> LabeledSequence {
        LabeledSequence::new(name, parse_label_list(labels).unwrap())
    }

    #[test]
    fn test_worked_example() {
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine
            .align(&seq("s1", "A.B.C.D,0"), &seq("s2", "A.B.C.D,A.B.X.Y"))
            .unwrap();

        // Full match, then unlabeled against labeled
        assert_eq!(result.raw_score, 7);
        assert_eq!(result.length, 2);
        assert_eq!(result.zero_zero_matches, 0);
        assert!((result.normalized_score - 3.5).abs() < 1e-12);
        assert_eq!(result.name1, "s1");
        assert_eq!(result.name2, "s2");
    }

    #[test]
    fn test_partial_match_example() {
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine
            .align(&seq("s1", "A.B.C.D,A.B.C.D"), &seq("s2", "A.B.C.D,A.B.X.Y"))
            .unwrap();
        assert_eq!(result.raw_score, 8 + 2);
        assert!((result.normalized_score - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_zero_excluded_from_normalization() {
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine.align(&seq("a", "A,0,0"), &seq("b", "A,0,0")).unwrap();
        assert_eq!(result.raw_score, 8);
        assert_eq!(result.length, 3);
        assert_eq!(result.zero_zero_matches, 2);
        assert!((result.normalized_score - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_unlabeled_is_an_error() {
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        assert!(matches!(
            engine.align(&seq("a", "0"), &seq("b", "0")),
            Err(AlignError::NoDomainInAlignment)
        ));
        assert!(matches!(
            engine.align(&seq("a", ""), &seq("b", "")),
            Err(AlignError::NoDomainInAlignment)
        ));
    }

    #[test]
    fn test_empty_against_non_empty() {
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine.align(&seq("a", ""), &seq("b", "A,B,C")).unwrap();
        assert_eq!(result.raw_score, -6);
        assert_eq!(result.length, 3);
        assert_eq!(join_aligned(&result.aligned1), "-,-,-");
        assert!((result.normalized_score + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_lengths_without_internal_gaps() {
        // The extra label hangs off the end: length == max(len1, len2)
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine.align(&seq("a", "A,B,C"), &seq("b", "A,B")).unwrap();
        assert_eq!(result.length, 3);
        assert_eq!(join_aligned(&result.aligned2), "A,B,-");
        assert_eq!(result.raw_score, 14);
    }

    #[test]
    fn test_unequal_lengths_with_internal_gaps() {
        // Mismatching the middle costs more than two gaps, so the alignment
        // grows beyond max(len1, len2)
        let engine = AlignmentEngine::new(&AlignmentConfig::default());
        let result = engine.align(&seq("a", "A,X,B"), &seq("b", "A,Y,B,C")).unwrap();
        assert!(result.length > 4);
        assert_eq!(result.aligned1.len(), result.aligned2.len());
    }

    #[test]
    fn test_ordered_scores() {
        let config = AlignmentConfig::default()
            .with_ordered_scores(&[10, 5, 3, 2, 1, -6, -2, -3, -1])
            .unwrap();
        assert_eq!(config.weights.full_match, 10);
        assert_eq!(config.weights.group3_match, 5);
        assert_eq!(config.weights.group2_match, 3);
        assert_eq!(config.weights.group1_match, 2);
        assert_eq!(config.weights.no_label, 1);
        assert_eq!(config.weights.different_labels, -6);
        assert_eq!(config.weights.label_vs_none, -2);
        assert_eq!(config.gap_open, -3);
        assert_eq!(config.gap_extend, -1);

        assert!(matches!(
            AlignmentConfig::default().with_ordered_scores(&[1, 2, 3]),
            Err(ConfigError::ScoreCount(3))
        ));
    }

    #[test]
    fn test_gap_model_selection() {
        let config = AlignmentConfig::default();
        assert_eq!(config.gap_model(), GapModel::Linear { open: -2 });
        assert_eq!(
            config.with_affine(true).gap_model(),
            GapModel::Affine {
                open: -2,
                extend: -1
            }
        );
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: AlignmentConfig =
            serde_json::from_str(r#"{"affine": true, "weights": {"full_match": 12}}"#).unwrap();
        assert!(config.affine);
        assert_eq!(config.weights.full_match, 12);
        assert_eq!(config.weights.group1_match, 1);
        assert_eq!(config.gap_open, PENALTY_GAP_OPEN);
    }

    #[test]
    fn test_extreme_weights_report_overflow() {
        let config = AlignmentConfig::default()
            .with_ordered_scores(&[i32::MAX, 4, 2, 1, 0, -5, -1, -2, -1])
            .unwrap();
        let engine = AlignmentEngine::new(&config);
        assert!(matches!(
            engine.align(&seq("a", "A,A"), &seq("b", "A,A")),
            Err(AlignError::ScoreOverflow { row: 2, col: 2 })
        ));

        // a single full match still fits
        let result = engine.align(&seq("a", "A"), &seq("b", "A")).unwrap();
        assert_eq!(result.raw_score, i32::MAX);
    }
}
