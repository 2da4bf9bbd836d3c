//! Parsers for domain-annotated sequence files.
//!
//! - **Clustered annotation files**: blocks of proteins grouped by cluster,
//!   each protein given as a list of domain spans over its residues
//!
//! ## Example
//!
//! ```rust
//! use domain_aligner::parsing::cluster::parse_cluster_text;
//!
//! let text = ">cluster 1 with 1 members\n#P1 (0,0,START) (0,2,A.B.C.D) (3,3,END)\n";
//! let file = parse_cluster_text(text).unwrap();
//!
//! assert_eq!(file.members[0].sequence.name, ">1,#P1");
//! assert_eq!(file.members[0].sequence.labels_to_csv(), "A.B.C.D,A.B.C.D,0");
//! ```
//!
//! ## Span Fields
//!
//! | Field | Example | Meaning |
//! |-------|---------|---------|
//! | start marker | `(0,0,START)` | ignored |
//! | domain span | `(0,10,101.1.12.33)` | positions 0..10 carry the label |
//! | end marker | `(250,250,END)` | sequence length 250 |

pub mod cluster;

pub use cluster::{parse_cluster_file, parse_cluster_text, ClusterFile, ClusterMember, ParseError};
