//! Global alignment of domain label sequences.
//!
//! The engine is a Needleman-Wunsch dynamic program in four stages:
//!
//! - [`scoring`]: scores a pair of labels under the hierarchy rules
//! - [`matrix`]: allocates the score and pointer matrices
//! - [`fill`]: fills both matrices, with simple or affine gap penalties
//! - [`traceback`]: walks the pointers back from the bottom-right cell
//!
//! [`AlignmentEngine`] ties the stages together and normalizes the score.
//!
//! ## Scoring
//!
//! | Pair | Default weight |
//! |------|----------------|
//! | both unlabeled | 0 |
//! | identical codes | 8 |
//! | one unlabeled | -1 |
//! | group 0 differs | -5 |
//! | first difference in group 1 | 1 |
//! | first difference in group 2 | 2 |
//! | first difference in group 3 | 4 |
//!
//! ## Example
//!
//! ```rust
//! use domain_aligner::alignment::{AlignmentConfig, AlignmentEngine};
//! use domain_aligner::core::label::parse_label_list;
//! use domain_aligner::LabeledSequence;
//!
//! let engine = AlignmentEngine::new(&AlignmentConfig::default());
//! let a = LabeledSequence::new("a", parse_label_list("A.B.C.D,0").unwrap());
//! let b = LabeledSequence::new("b", parse_label_list("A.B.C.D,A.B.X.Y").unwrap());
//!
//! let result = engine.align(&a, &b).unwrap();
//! assert_eq!(result.raw_score, 7);
//! assert_eq!(result.length, 2);
//! ```

pub mod engine;
pub mod fill;
pub mod matrix;
pub mod scoring;
pub mod traceback;

pub use engine::{
    normalize, AlignError, AlignmentConfig, AlignmentEngine, AlignmentResult, ConfigError,
};
pub use fill::GapModel;
pub use scoring::{LabelScorer, ScoringWeights};
