//! Shared helpers: input validation and resource limits.

pub mod validation;
