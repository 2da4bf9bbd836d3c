//! Writers for alignment results.
//!
//! - [`RecordWriter`]: the plain comma-delimited record file, three lines per
//!   alignment
//! - [`HumanReadableWriter`]: the same alignments with every label padded to
//!   fixed-width groups so columns line up

pub mod records;
pub mod render;

pub use records::{format_score, RecordWriter};
pub use render::{render_label, render_stream, HumanReadableWriter};
