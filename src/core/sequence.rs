use serde::{Deserialize, Serialize};

use crate::core::label::Label;

/// A named, ordered sequence of domain labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSequence {
    /// Opaque identifier carried through to the output records
    pub name: String,

    /// One label per residue position
    pub labels: Vec<Label>,
}

impl LabeledSequence {
    pub fn new(name: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Fraction of positions that carry a domain label
    pub fn domain_coverage(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let labeled = self.labels.iter().filter(|l| !l.is_unlabeled()).count();
        #[allow(clippy::cast_precision_loss)]
        let coverage = labeled as f64 / self.labels.len() as f64;
        coverage
    }

    /// Labels joined with commas, the converted on-disk representation
    pub fn labels_to_csv(&self) -> String {
        self.labels
            .iter()
            .map(Label::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
