use std::io::Write;

use tracing::warn;

use crate::alignment::engine::AlignmentResult;
use crate::core::label::{Label, GROUP_COUNT};
use crate::core::types::AlignedLabel;
use crate::output::records::format_score;

/// Width every group is padded to
pub const GROUP_WIDTH: usize = 4;

const PAD: char = '_';
const UNLABELED_RENDERING: &str = "0000.0000.0000.0000";
const GAP_RENDERING: &str = "----.----.----.----";

/// Render one aligned element with fixed-width groups: values padded with
/// `_`, absent groups as `____`, unlabeled as zeros and gaps as dashes.
#[must_use]
pub fn render_label(item: &AlignedLabel) -> String {
    let domain = match item {
        AlignedLabel::Gap => return GAP_RENDERING.to_string(),
        AlignedLabel::Label(Label::Unlabeled) => return UNLABELED_RENDERING.to_string(),
        AlignedLabel::Label(Label::Domain(domain)) => domain,
    };

    let groups: Vec<String> = (0..GROUP_COUNT)
        .map(|index| {
            let value = domain.group(index).unwrap_or_default();
            if value.chars().count() > GROUP_WIDTH {
                warn!(
                    label = domain.code(),
                    group = value,
                    "Domain label group is wider than {GROUP_WIDTH} characters"
                );
            }
            format!("{value:_<GROUP_WIDTH$}")
        })
        .collect();

    groups.join(".")
}

/// Render an aligned stream, elements joined with commas
#[must_use]
pub fn render_stream(stream: &[AlignedLabel]) -> String {
    stream
        .iter()
        .map(render_label)
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes the human-readable rendering of alignment results:
///
/// ```text
/// name1,name2,raw_score,normalized_score
/// rendered sequence 1
/// rendered sequence 2
/// ```
pub struct HumanReadableWriter<W: Write> {
    inner: W,
    lines_written: usize,
}

impl<W: Write> HumanReadableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            lines_written: 0,
        }
    }

    /// Write one rendered alignment
    ///
    /// # Errors
    ///
    /// Returns any IO error from the underlying writer.
    pub fn write(&mut self, result: &AlignmentResult) -> std::io::Result<()> {
        writeln!(
            self.inner,
            "{},{},{},{}",
            result.name1,
            result.name2,
            result.raw_score,
            format_score(result.normalized_score)
        )?;
        writeln!(self.inner, "{}", render_stream(&result.aligned1))?;
        writeln!(self.inner, "{}", render_stream(&result.aligned2))?;
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
