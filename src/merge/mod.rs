//! Merge module - Writes directive overrides into a YAML config file.
//!
//! The original file is moved aside to a backup path, parsed, updated with
//! the coerced directives, and written back under its old name behind a
//! generated-file header.

mod error;
mod merger;


pub use error::*;
pub use merger::*;
