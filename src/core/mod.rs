//! Core data types for domain architecture alignment.
//!
//! - [`Label`]: a hierarchical domain code (`A.B.C.D`) or the unlabeled sentinel `0`
//! - [`DomainLabel`]: a validated code, pre-split into up to four groups
//! - [`LabeledSequence`]: a named, ordered sequence of labels
//! - [`AlignedLabel`]: one side of an alignment column (label or gap)
//!
//! ## Label Hierarchy
//!
//! Codes are compared group by group from the outermost group inward:
//!
//! | Group | Example (`101.1.12.33`) | Meaning |
//! |-------|-------------------------|---------|
//! | 0     | 101                     | outermost class |
//! | 1     | 1                       | first subdivision |
//! | 2     | 12                      | second subdivision |
//! | 3     | 33                      | innermost family |
//!
//! A code with fewer than four groups leaves the trailing groups absent.

pub mod label;
pub mod sequence;
pub mod types;

pub use label::{DomainLabel, Label, LabelError};
pub use sequence::LabeledSequence;
pub use types::AlignedLabel;
