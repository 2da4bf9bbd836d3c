//! Command-line interface for domain-aligner.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **align**: Align every pair of sequences in a clustered annotation file
//! - **pair**: Align two label lists given on the command line
//!
//! ## Usage
//!
//! ```text
//! # All pairs plus self-alignments, records written next to the input
//! domain-aligner align clusters.txt
//!
//! # Affine gaps, no self-alignments, human-readable copy
//! domain-aligner align clusters.txt --affine --no-self-alignment --human-readable
//!
//! # Override the nine scoring values
//! domain-aligner align clusters.txt --scores 8 4 2 1 0 -5 -1 -2 -1
//!
//! # Quick comparison of two architectures
//! domain-aligner pair "A.B.C.D,0,A.B" "A.B.C.D,A.B" --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::alignment::engine::AlignmentConfig;

pub mod align;
pub mod pair;

#[derive(Parser)]
#[command(name = "domain-aligner")]
#[command(version)]
#[command(about = "Globally align protein domain architectures with a modified Needleman-Wunsch")]
#[command(
    long_about = "domain-aligner aligns sequences of hierarchical domain labels (e.g. 101.1.12.33) pairwise.\n\nScores reward agreement on the outer groups of the hierarchy, penalize unrelated domains, and support either a single gap penalty or separate gap opening and extension penalties.\n\nRecord output format: name1,name2,score,alignment length,normalized score, followed by the two aligned sequences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Write log messages to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format for results printed to stdout
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Effective log level, `--verbose` raising it to at least debug
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            self.log_level.max(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align all pairs of sequences in a clustered annotation file
    Align(align::AlignArgs),

    /// Align two comma-separated label lists
    Pair(pair::PairArgs),
}

/// Scoring options shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Charge gap openings and gap extensions differently
    #[arg(short = 'g', long)]
    pub affine: bool,

    /// Nine scoring values: full match, group 3 match, group 2 match,
    /// group 1 match, unlabeled pair, different labels, label vs unlabeled,
    /// gap open, gap extend
    #[arg(
        short,
        long,
        num_args = 9,
        allow_negative_numbers = true,
        value_names = ["FULL", "G3", "G2", "G1", "NONE", "DIFF", "VS_NONE", "OPEN", "EXTEND"]
    )]
    pub scores: Option<Vec<i32>>,

    /// JSON file with an alignment configuration; --scores and --affine
    /// take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ScoringArgs {
    /// Build the engine configuration: defaults, then the config file, then
    /// the ordered scores, then the affine flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn to_config(&self) -> anyhow::Result<AlignmentConfig> {
        let mut config = match &self.config {
            Some(path) => AlignmentConfig::load_from_file(path)
                .with_context(|| format!("Cannot load configuration {}", path.display()))?,
            None => AlignmentConfig::default(),
        };

        if let Some(values) = &self.scores {
            config = config.with_ordered_scores(values)?;
            tracing::info!(scores = ?values, "Scores set from the command line");
        }

        if self.affine {
            config = config.with_affine(true);
        }

        if config.affine {
            tracing::info!(
                gap_open = config.gap_open,
                gap_extend = config.gap_extend,
                "Using separate gap opening and extension penalties"
            );
        }

        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_scores_parse() {
        let cli = Cli::try_parse_from([
            "domain-aligner",
            "pair",
            "A",
            "A",
            "--scores",
            "8",
            "4",
            "2",
            "1",
            "0",
            "-5",
            "-1",
            "-3",
            "-1",
        ])
        .unwrap();
        let Commands::Pair(args) = cli.command else {
            panic!("expected pair command");
        };
        let config = args.scoring.to_config().unwrap();
        assert_eq!(config.gap_open, -3);
        assert_eq!(config.weights.different_labels, -5);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::try_parse_from(["domain-aligner", "-v", "pair", "A", "A"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Debug);

        let cli =
            Cli::try_parse_from(["domain-aligner", "--log-level", "trace", "-v", "pair", "A", "A"])
                .unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Trace);

        let cli = Cli::try_parse_from(["domain-aligner", "pair", "A", "A"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"gap_open": -4, "weights": {"full_match": 9}}"#).unwrap();

        let args = ScoringArgs {
            affine: true,
            scores: None,
            config: Some(path),
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.gap_open, -4);
        assert_eq!(config.weights.full_match, 9);
        assert!(config.affine);
    }
}
