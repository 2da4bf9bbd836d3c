use std::io::Write;

use crate::alignment::engine::AlignmentResult;
use crate::core::types::join_aligned;

/// Format a normalized score as a decimal that always has a fractional part
/// (`3.0`, `4.5`, `2.3333333333333335`).
#[must_use]
pub fn format_score(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Writes alignment results as three comma-delimited lines each:
///
/// ```text
/// name1,name2,raw_score,length,normalized_score
/// aligned sequence 1
/// aligned sequence 2
/// ```
pub struct RecordWriter<W: Write> {
    inner: W,
    lines_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            lines_written: 0,
        }
    }

    /// Write one alignment record
    ///
    /// # Errors
    ///
    /// Returns any IO error from the underlying writer.
    pub fn write(&mut self, result: &AlignmentResult) -> std::io::Result<()> {
        writeln!(
            self.inner,
            "{},{},{},{},{}",
            result.name1,
            result.name2,
            result.raw_score,
            result.length,
            format_score(result.normalized_score)
        )?;
        writeln!(self.inner, "{}", join_aligned(&result.aligned1))?;
        writeln!(self.inner, "{}", join_aligned(&result.aligned2))?;
        self.lines_written += 3;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flush and return the underlying writer
    ///
    /// # Errors
    ///
    /// Returns any IO error from flushing.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
