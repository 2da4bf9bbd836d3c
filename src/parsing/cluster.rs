use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::label::{Label, LabelError};
use crate::core::sequence::LabeledSequence;
use crate::utils::validation::{check_sequence_limit, MAX_SEQUENCES};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Invalid domain label on line {line}: {source}")]
    InvalidLabel {
        line: usize,
        #[source]
        source: LabelError,
    },

    #[error("Too many sequences: {0} exceeds maximum allowed ({MAX_SEQUENCES})")]
    TooManySequences(usize),
}

/// One annotated protein read from a cluster block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMember {
    pub cluster_id: u64,
    pub accession: String,
    pub sequence: LabeledSequence,
}

/// Contents of a clustered domain-annotation file
#[derive(Debug, Clone, Default)]
pub struct ClusterFile {
    /// Members in file order
    pub members: Vec<ClusterMember>,

    /// Number of cluster header lines
    pub clusters: usize,

    /// Number of non-blank lines read
    pub lines_read: usize,
}

impl ClusterFile {
    pub fn into_sequences(self) -> Vec<LabeledSequence> {
        self.members.into_iter().map(|m| m.sequence).collect()
    }
}

/// Cluster whose members are currently being read
struct OpenCluster {
    id: u64,
    declared: u64,
    counted: u64,
}

impl OpenCluster {
    fn close(&self) {
        debug!(
            cluster = self.id,
            declared = self.declared,
            counted = self.counted,
            "Finished cluster"
        );
        if self.declared != self.counted {
            warn!(
                cluster = self.id,
                declared = self.declared,
                counted = self.counted,
                "Number of sequences read does not match the number declared for the cluster"
            );
        }
    }
}

/// Parse a clustered domain-annotation file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_cluster_file(path: &Path) -> Result<ClusterFile, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_cluster_text(&content)
}

/// Parse clustered domain annotations.
///
/// ```text
/// >cluster 12 with 2 members
/// #P12345 (0,0,START) (0,10,101.1.12.33) (14,20,101.1.5) (25,25,END)
/// #Q67890 (0,0,START) (3,13,101.1.12.33) (20,20,END)
/// ```
///
/// A header line starts with `>` and holds the cluster id and the declared
/// member count as its first two numbers. Each member line holds the
/// accession, a start marker, any number of `(start,end,LABEL)` domain spans
/// (half-open, 0-based) and an end marker whose first number is the sequence
/// length. Positions outside every span are unlabeled.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for malformed header or member lines,
/// out-of-range spans, members before the first header, or fewer than two
/// lines of content; `ParseError::InvalidLabel` for an invalid domain code;
/// `ParseError::TooManySequences` if the limit is exceeded.
pub fn parse_cluster_text(text: &str) -> Result<ClusterFile, ParseError> {
    let mut file = ClusterFile::default();
    let mut current: Option<OpenCluster> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        file.lines_read += 1;

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if line.starts_with('>') {
            if let Some(cluster) = current.take() {
                cluster.close();
            }
            let (id, declared) = parse_header(line, line_num)?;
            file.clusters += 1;
            current = Some(OpenCluster {
                id,
                declared,
                counted: 0,
            });
            continue;
        }

        let Some(cluster) = current.as_mut() else {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num}: sequence found before any cluster header"
            )));
        };
        cluster.counted += 1;

        if check_sequence_limit(file.members.len()).is_some() {
            return Err(ParseError::TooManySequences(file.members.len()));
        }

        let (accession, labels) = parse_member(line, line_num)?;
        let name = format!(">{},{}", cluster.id, accession);
        file.members.push(ClusterMember {
            cluster_id: cluster.id,
            accession: accession.to_string(),
            sequence: LabeledSequence::new(name, labels),
        });
    }

    if let Some(cluster) = current.take() {
        cluster.close();
    }

    if file.lines_read < 2 {
        return Err(ParseError::InvalidFormat(
            "The provided input contains less than 2 lines".to_string(),
        ));
    }

    info!(
        clusters = file.clusters,
        sequences = file.members.len(),
        lines = file.lines_read,
        "Input parsed"
    );

    Ok(file)
}

/// Extract the cluster id and declared member count from a header line
fn parse_header(line: &str, line_num: usize) -> Result<(u64, u64), ParseError> {
    let malformed =
        || ParseError::InvalidFormat(format!("Line {line_num}: malformed cluster header '{line}'"));

    let mut numbers = line
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .map(str::parse::<u64>);

    match (numbers.next(), numbers.next()) {
        (Some(Ok(id)), Some(Ok(declared))) => Ok((id, declared)),
        _ => Err(malformed()),
    }
}

/// Expand a member line into its accession and per-position labels
fn parse_member(line: &str, line_num: usize) -> Result<(&str, Vec<Label>), ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num}: malformed sequence representation '{line}'"
        )));
    }

    let accession = fields[0];
    let (length, _, _) = parse_span(fields[fields.len() - 1], line_num)?;
    let mut labels = vec![Label::Unlabeled; length];

    for field in &fields[2..fields.len() - 1] {
        let (start, end, code) = parse_span(field, line_num)?;
        if start > end || end > length {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num}: domain span '{field}' outside sequence of length {length}"
            )));
        }
        let label =
            Label::parse(code).map_err(|source| ParseError::InvalidLabel { line: line_num, source })?;
        labels[start..end].fill(label);
    }

    Ok((accession, labels))
}

/// Split `(start,end,TEXT)` into its parts
fn parse_span(field: &str, line_num: usize) -> Result<(usize, usize, &str), ParseError> {
    let malformed =
        || ParseError::InvalidFormat(format!("Line {line_num}: malformed domain span '{field}'"));

    let inner = field
        .strip_prefix('(')
        .and_then(|f| f.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut parts = inner.splitn(3, ',');
    let (Some(start), Some(end), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let start = start.trim().parse().map_err(|_| malformed())?;
    let end = end.trim().parse().map_err(|_| malformed())?;
    Ok((start, end, text))
}

/// Write members in the converted two-line format: the sequence name, then
/// its comma-joined labels. Returns the number of lines written.
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_converted<W: Write>(
    writer: &mut W,
    members: &[ClusterMember],
) -> std::io::Result<usize> {
    for member in members {
        writeln!(writer, "{}", member.sequence.name)?;
        writeln!(writer, "{}", member.sequence.labels_to_csv())?;
    }
    Ok(members.len() * 2)
}
