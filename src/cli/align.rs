use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::alignment::engine::AlignmentEngine;
use crate::cli::{OutputFormat, ScoringArgs};
use crate::output::{HumanReadableWriter, RecordWriter};
use crate::parsing::cluster::{parse_cluster_file, write_converted};
use crate::pipeline::{align_all_pairs, BatchOptions, RunStats};
use crate::utils::validation::validate_input_file;

/// Timestamp prefix of generated output file names
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Args)]
pub struct AlignArgs {
    /// Clustered domain-annotation file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Alignment record file [default: <timestamp>_alignments_<input name>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the alignments with fixed-width label groups
    /// [default path: <timestamp>_file_alignments_verbose_<input name>]
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    pub human_readable: Option<Option<PathBuf>>,

    /// Do not align sequences with themselves
    #[arg(short = 'a', long)]
    pub no_self_alignment: bool,

    /// Keep the input converted to one label list per sequence
    /// [default path: <timestamp>_formatted_input_<input name>]
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    pub keep_converted: Option<Option<PathBuf>>,

    /// Log and skip pairs that cannot be aligned instead of stopping
    #[arg(long)]
    pub skip_failed: bool,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Output file names derived from the input name and the start time
struct OutputPaths {
    records: PathBuf,
    human_readable: Option<PathBuf>,
    converted: Option<PathBuf>,
}

impl OutputPaths {
    fn resolve(args: &AlignArgs, timestamp: &str) -> Self {
        let basename = args
            .input
            .file_name()
            .map_or_else(|| "input".to_string(), |n| n.to_string_lossy().into_owned());
        let generated = |kind: &str| PathBuf::from(format!("{timestamp}_{kind}_{basename}"));

        Self {
            records: args
                .output
                .clone()
                .unwrap_or_else(|| generated("alignments")),
            human_readable: args
                .human_readable
                .as_ref()
                .map(|path| {
                    path.clone()
                        .unwrap_or_else(|| generated("file_alignments_verbose"))
                }),
            converted: args
                .keep_converted
                .as_ref()
                .map(|path| path.clone().unwrap_or_else(|| generated("formatted_input"))),
        }
    }
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn run(args: AlignArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    validate_input_file(&args.input)?;

    let config = args.scoring.to_config()?;
    let engine = AlignmentEngine::new(&config);

    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    let paths = OutputPaths::resolve(&args, &timestamp);

    let parsed = parse_cluster_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    info!(
        clusters = parsed.clusters,
        sequences = parsed.members.len(),
        lines = parsed.lines_read,
        "Input converted"
    );

    if let Some(path) = &paths.converted {
        let mut out = create_output(path)?;
        let lines = write_converted(&mut out, &parsed.members)?;
        out.flush()?;
        debug!(path = %path.display(), lines, "Converted input kept");
    }

    let sequences = parsed.into_sequences();

    if verbose {
        eprintln!(
            "Aligning {} sequences from {}",
            sequences.len(),
            args.input.display()
        );
    }

    let options = BatchOptions {
        self_alignments: !args.no_self_alignment,
        skip_failed: args.skip_failed,
    };

    let mut records = RecordWriter::new(create_output(&paths.records)?);
    let mut human = match &paths.human_readable {
        Some(path) => Some(HumanReadableWriter::new(create_output(path)?)),
        None => None,
    };

    let stats = align_all_pairs(&engine, &sequences, options, |result| {
        records.write(result)?;
        if let Some(writer) = human.as_mut() {
            writer.write(result)?;
        }
        Ok(())
    })
    .with_context(|| format!("Alignment of {} stopped", args.input.display()))?;

    let lines_written = records.lines_written();
    records.finish()?;
    if let Some(writer) = human {
        writer.finish()?;
    }

    stats.log();
    if lines_written != stats.alignments * 3 {
        warn!(
            lines = lines_written,
            expected = stats.alignments * 3,
            "The alignment file does not have the expected number of lines"
        );
    }

    match format {
        OutputFormat::Text => print_text_summary(&stats, &paths),
        OutputFormat::Json => print_json_summary(&stats, &paths)?,
        OutputFormat::Tsv => print_tsv_summary(&stats, &paths),
    }

    Ok(())
}

fn print_text_summary(stats: &RunStats, paths: &OutputPaths) {
    println!("Alignment Run");
    println!("{}", "=".repeat(60));
    println!("  Sequences: {}", stats.sequences);
    println!("  Alignments: {} of {} expected", stats.alignments, stats.expected);
    if stats.failed > 0 {
        println!("  Skipped: {}", stats.failed);
    }
    println!("\nRecords: {}", paths.records.display());
    if let Some(path) = &paths.human_readable {
        println!("Human-readable: {}", path.display());
    }
    if let Some(path) = &paths.converted {
        println!("Converted input: {}", path.display());
    }
}

fn print_json_summary(stats: &RunStats, paths: &OutputPaths) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "stats": stats,
        "records": paths.records,
        "human_readable": paths.human_readable,
        "converted": paths.converted,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(stats: &RunStats, paths: &OutputPaths) {
    println!("sequences\texpected\talignments\tfailed\trecords");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        stats.sequences,
        stats.expected,
        stats.alignments,
        stats.failed,
        paths.records.display()
    );
}
