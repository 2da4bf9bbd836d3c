use serde::{Deserialize, Serialize};

use crate::core::label::{DomainLabel, Label, GROUP_COUNT};

/// Score for two identical codes
pub const WEIGHT_FULL_MATCH: i32 = 8;
/// Groups 0-2 agree, group 3 differs
pub const WEIGHT_MATCH_GROUP3: i32 = 4;
/// Groups 0-1 agree, group 2 differs
pub const WEIGHT_MATCH_GROUP2: i32 = 2;
/// Group 0 agrees, group 1 differs
pub const WEIGHT_MATCH_GROUP1: i32 = 1;
/// Both positions unlabeled
pub const WEIGHT_NO_LABEL: i32 = 0;
/// Group 0 differs
pub const WEIGHT_MISMATCH_DIFFERENT_LABELS: i32 = -5;
/// One position labeled, the other not
pub const WEIGHT_MISMATCH_LABEL_VS_NONE: i32 = -1;

/// Configurable weights for the label scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub full_match: i32,
    pub group3_match: i32,
    pub group2_match: i32,
    pub group1_match: i32,
    pub no_label: i32,
    pub different_labels: i32,
    pub label_vs_none: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            full_match: WEIGHT_FULL_MATCH,
            group3_match: WEIGHT_MATCH_GROUP3,
            group2_match: WEIGHT_MATCH_GROUP2,
            group1_match: WEIGHT_MATCH_GROUP1,
            no_label: WEIGHT_NO_LABEL,
            different_labels: WEIGHT_MISMATCH_DIFFERENT_LABELS,
            label_vs_none: WEIGHT_MISMATCH_LABEL_VS_NONE,
        }
    }
}

impl ScoringWeights {
    /// Weight for a partial match that first diverges at `group` (1..=3)
    fn partial_match(&self, group: usize) -> i32 {
        match group {
            1 => self.group1_match,
            2 => self.group2_match,
            _ => self.group3_match,
        }
    }
}

/// Scores pairs of labels under the hierarchy rules
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelScorer {
    weights: ScoringWeights,
}

impl LabelScorer {
    #[must_use]
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score a pair of labels.
    ///
    /// Rules, first applicable wins:
    /// 1. both unlabeled
    /// 2. identical codes
    /// 3. exactly one unlabeled
    /// 4. group-wise comparison from group 0 inward, where two absent
    ///    groups end the comparison at that tier
    #[must_use]
    pub fn score(&self, a: &Label, b: &Label) -> i32 {
        match (a, b) {
            (Label::Unlabeled, Label::Unlabeled) => self.weights.no_label,
            _ if a == b => self.weights.full_match,
            (Label::Unlabeled, _) | (_, Label::Unlabeled) => self.weights.label_vs_none,
            (Label::Domain(x), Label::Domain(y)) => self.score_domains(x, y),
        }
    }

    fn score_domains(&self, a: &DomainLabel, b: &DomainLabel) -> i32 {
        if a.group(0) != b.group(0) {
            return self.weights.different_labels;
        }

        for group in 1..GROUP_COUNT {
            let (x, y) = (a.group(group), b.group(group));
            if x != y || (x.is_none() && y.is_none()) {
                return self.weights.partial_match(group);
            }
        }

        // Equal groups imply equal codes, which rule 2 already handled.
        unreachable!("labels '{}' and '{}' have identical groups", a.code(), b.code())
    }
}
