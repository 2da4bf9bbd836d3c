//! All-pairs driver: enumerates sequence pairs, aligns them one after the
//! other and hands every result to a sink.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::alignment::engine::{AlignError, AlignmentEngine, AlignmentResult};
use crate::core::sequence::LabeledSequence;
use crate::utils::validation::expected_alignments;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Alignment of '{name1}' with '{name2}' failed: {source}")]
    Align {
        name1: String,
        name2: String,
        #[source]
        source: AlignError,
    },

    #[error("Failed to write alignment: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for an all-pairs run
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Also align every sequence with itself
    pub self_alignments: bool,

    /// Log and skip pairs that fail to align instead of aborting the run
    pub skip_failed: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            self_alignments: true,
            skip_failed: false,
        }
    }
}

/// Counters for one all-pairs run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sequences: usize,
    pub expected: usize,
    pub alignments: usize,
    pub failed: usize,
}

impl RunStats {
    /// Log the run summary, warning when the counts do not add up
    pub fn log(&self) {
        info!(
            sequences = self.sequences,
            alignments = self.alignments,
            failed = self.failed,
            expected = self.expected,
            "Alignment run finished"
        );
        if self.alignments + self.failed != self.expected {
            warn!(
                computed = self.alignments + self.failed,
                expected = self.expected,
                "The run did not process the expected number of alignments"
            );
        }
    }
}

/// Every unordered pair `(a, b)` with `a` before `b` in input order, then,
/// if requested, every sequence paired with itself.
pub fn enumerate_pairs(
    sequences: &[LabeledSequence],
    self_alignments: bool,
) -> impl Iterator<Item = (&LabeledSequence, &LabeledSequence)> {
    let n = sequences.len();
    let distinct = (0..n).flat_map(move |a| (a + 1..n).map(move |b| (&sequences[a], &sequences[b])));
    let selves = sequences
        .iter()
        .filter(move |_| self_alignments)
        .map(|s| (s, s));
    distinct.chain(selves)
}

/// Align every pair and pass each result to `sink`.
///
/// # Errors
///
/// Returns `BatchError::Align` for the first failing pair unless
/// `options.skip_failed` is set, or `BatchError::Io` if the sink fails.
pub fn align_all_pairs<F>(
    engine: &AlignmentEngine,
    sequences: &[LabeledSequence],
    options: BatchOptions,
    mut sink: F,
) -> Result<RunStats, BatchError>
where
    F: FnMut(&AlignmentResult) -> std::io::Result<()>,
{
    let mut stats = RunStats {
        sequences: sequences.len(),
        expected: expected_alignments(sequences.len(), options.self_alignments),
        ..RunStats::default()
    };

    if options.self_alignments {
        info!("Computing self-alignments; disable them with --no-self-alignment");
    }

    for (seq1, seq2) in enumerate_pairs(sequences, options.self_alignments) {
        match engine.align(seq1, seq2) {
            Ok(result) => {
                sink(&result)?;
                stats.alignments += 1;
            }
            Err(source) if options.skip_failed => {
                warn!(seq1 = %seq1.name, seq2 = %seq2.name, error = %source, "Skipping pair");
                stats.failed += 1;
            }
            Err(source) => {
                return Err(BatchError::Align {
                    name1: seq1.name.clone(),
                    name2: seq2.name.clone(),
                    source,
                });
            }
        }
    }

    Ok(stats)
}
