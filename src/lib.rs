//! # Directive Merge
//!
//! Merges configuration directives into the YAML config of a database node.
//!
//! Directive values arrive as plain strings. Each one is coerced to the typed
//! value it stands for, then written over the matching top-level key of the
//! config document. The original file is kept under a backup name.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of YAML/JSON documents
//! - [`coerce`] - Ordered rules turning raw strings into typed values
//! - [`directive`] - Directive sets, node attributes, and the version gate
//! - [`merge`] - Backup, merge and rewrite of a config file

pub mod coerce;
pub mod directive;
pub mod merge;
pub mod value;

pub use coerce::{coerce, coerce_with_rule, Rule};
pub use directive::{
    supports_overrides, version_supported, DirectiveError, Directives, NodeAttributes,
};
pub use merge::{backup_path, merge, MergeError, MergeReport, Merger, MergerBuilder};
pub use value::{Map, Value};
