//! # domain-aligner
//!
//! A library for globally aligning protein domain architectures.
//!
//! A protein's domain architecture is written as a sequence of hierarchical
//! domain labels, one per residue position: dot-separated classification
//! codes such as `101.1.12.33`, or `0` where no domain is annotated. Two
//! architectures are compared with a Needleman-Wunsch alignment whose scores
//! follow the label hierarchy: identical codes score highest, codes sharing
//! their outer groups score partially, unrelated codes are penalized.
//!
//! ## Features
//!
//! - **Hierarchy-aware scoring**: partial credit for labels agreeing on their
//!   first one, two or three groups
//! - **Linear or affine gaps**: a single gap penalty, or separate opening and
//!   extension penalties
//! - **Normalized scores**: raw scores divided by the number of columns that
//!   carry at least one domain
//! - **Clustered input**: reads clustered domain annotations and aligns all
//!   pairs of sequences
//!
//! ## Example
//!
//! ```rust
//! use domain_aligner::{AlignmentConfig, AlignmentEngine, LabeledSequence};
//! use domain_aligner::core::label::parse_label_list;
//!
//! let engine = AlignmentEngine::new(&AlignmentConfig::default());
//!
//! let a = LabeledSequence::new("a", parse_label_list("A.B.C.D,0").unwrap());
//! let b = LabeledSequence::new("b", parse_label_list("A.B.C.D,A.B.X.Y").unwrap());
//!
//! let result = engine.align(&a, &b).unwrap();
//! assert_eq!(result.raw_score, 7);
//! assert_eq!(result.normalized_score, 3.5);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Domain labels, labeled sequences and aligned elements
//! - [`alignment`]: Scoring, dynamic programming and traceback
//! - [`parsing`]: Parser for clustered domain annotations
//! - [`pipeline`]: All-pairs alignment driver
//! - [`output`]: Record and human-readable writers
//! - [`cli`]: Command-line interface implementation

pub mod alignment;
pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod pipeline;
pub mod utils;

pub use alignment::{AlignError, AlignmentConfig, AlignmentEngine, AlignmentResult, GapModel};
pub use core::label::Label;
pub use core::sequence::LabeledSequence;
pub use pipeline::{align_all_pairs, BatchOptions, RunStats};
