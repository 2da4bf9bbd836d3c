use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Text used for positions without a domain label
pub const UNLABELED: &str = "0";

/// Separator between the groups of a hierarchical code
pub const GROUP_DELIMITER: char = '.';

/// Maximum number of groups in a hierarchical code
pub const GROUP_COUNT: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("Empty domain label found")]
    Empty,

    #[error("Empty first group in domain label '{0}'")]
    EmptyFirstGroup(String),

    #[error("Domain label '{0}' has more than {GROUP_COUNT} groups")]
    TooManyGroups(String),
}

/// A hierarchical classification code such as `A.B.C.D`.
///
/// The code is split into its groups once at construction. Groups beyond
/// the ones present in the text are absent (`None`), which never compares
/// equal to a real group value.
#[derive(Debug, Clone)]
pub struct DomainLabel {
    code: String,
    groups: [Option<Range<usize>>; GROUP_COUNT],
}

impl DomainLabel {
    /// Parse a code, validating its group structure
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Empty` for empty text, `LabelError::EmptyFirstGroup`
    /// if the text starts with the delimiter, or `LabelError::TooManyGroups` if
    /// there are more than four groups.
    pub fn parse(code: &str) -> Result<Self, LabelError> {
        if code.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut groups: [Option<Range<usize>>; GROUP_COUNT] = Default::default();
        let mut start = 0;
        for (index, part) in code.split(GROUP_DELIMITER).enumerate() {
            if index >= GROUP_COUNT {
                return Err(LabelError::TooManyGroups(code.to_string()));
            }
            groups[index] = Some(start..start + part.len());
            start += part.len() + GROUP_DELIMITER.len_utf8();
        }

        if groups[0].as_ref().is_some_and(Range::is_empty) {
            return Err(LabelError::EmptyFirstGroup(code.to_string()));
        }

        Ok(Self {
            code: code.to_string(),
            groups,
        })
    }

    /// The full code as read
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Group value at `index`, or `None` when the group is absent
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups
            .get(index)?
            .as_ref()
            .map(|range| &self.code[range.clone()])
    }
}

impl PartialEq for DomainLabel {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for DomainLabel {}

/// Label attached to one position of a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The `0` sentinel: no domain annotated at this position
    Unlabeled,
    Domain(DomainLabel),
}

impl Label {
    /// Parse label text; `0` is the unlabeled sentinel
    ///
    /// # Errors
    ///
    /// Returns a `LabelError` if the text is not a valid hierarchical code.
    pub fn parse(text: &str) -> Result<Self, LabelError> {
        if text == UNLABELED {
            Ok(Self::Unlabeled)
        } else {
            DomainLabel::parse(text).map(Self::Domain)
        }
    }

    pub fn is_unlabeled(&self) -> bool {
        matches!(self, Self::Unlabeled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unlabeled => UNLABELED,
            Self::Domain(domain) => domain.code(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse a comma-separated list of labels, e.g. `A.B.C.D,0,0,A.B`
///
/// # Errors
///
/// Returns the first `LabelError` encountered. An empty string yields an
/// empty list.
pub fn parse_label_list(text: &str) -> Result<Vec<Label>, LabelError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(|item| Label::parse(item.trim())).collect()
}
