use serde::{Serialize, Serializer};

use crate::core::label::Label;

/// Marker written for alignment columns where one sequence has no position
pub const GAP: &str = "-";

/// One side of an alignment column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignedLabel {
    Gap,
    Label(Label),
}

impl AlignedLabel {
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Gap => GAP,
            Self::Label(label) => label.as_str(),
        }
    }
}

impl std::fmt::Display for AlignedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for AlignedLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Join an aligned stream with commas, as written to the record file
pub fn join_aligned(stream: &[AlignedLabel]) -> String {
    stream
        .iter()
        .map(AlignedLabel::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
