//! Centralized validation and helper functions.

use std::path::Path;

/// Maximum number of cells in one alignment matrix (resource protection)
pub const MAX_MATRIX_CELLS: usize = 1_000_000_000;

/// Maximum number of sequences read from one input file
pub const MAX_SEQUENCES: usize = 100_000;

/// Input file validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("The input file does not exist: {0}")]
    NotFound(String),
    #[error("The specified path does not point to a file: {0}")]
    NotAFile(String),
    #[error("The input file is empty: {0}")]
    EmptyFile(String),
    #[error("IO error while checking input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that `path` exists, is a regular file, and is not empty.
///
/// # Errors
///
/// Returns `ValidationError::NotFound`, `ValidationError::NotAFile` or
/// `ValidationError::EmptyFile` accordingly, or `ValidationError::Io` if the
/// metadata cannot be read.
pub fn validate_input_file(path: &Path) -> Result<(), ValidationError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ValidationError::NotFound(display));
    }

    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(ValidationError::NotAFile(display));
    }
    if metadata.len() == 0 {
        return Err(ValidationError::EmptyFile(display));
    }

    Ok(())
}

/// Check if adding another sequence would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new sequence.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sequence_limit(count: usize) -> Option<String> {
    if count >= MAX_SEQUENCES {
        Some(format!(
            "Too many sequences: adding another would exceed maximum of {MAX_SEQUENCES}"
        ))
    } else {
        None
    }
}

/// Number of alignments an all-pairs run should produce for `sequences`
/// inputs, with or without self-alignments.
#[must_use]
pub fn expected_alignments(sequences: usize, self_alignments: bool) -> usize {
    let pairs = sequences * sequences.saturating_sub(1) / 2;
    if self_alignments {
        pairs + sequences
    } else {
        pairs
    }
}
