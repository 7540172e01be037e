//! Errors raised by a directive merge.

use std::path::PathBuf;
use thiserror::Error;

/// MergeError is returned by [`merge`](super::merge) and [`Merger::merge`](super::Merger::merge).
///
/// There is no error for a bad directive value: every raw string coerces to
/// something.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The config path does not exist or cannot be read as a file. Nothing was
    /// moved or written.
    #[error("config file {} is missing or unreadable: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: expected a mapping at the document root, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("failed to serialize merged config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// Returns true if the merge stopped before touching the file system.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, MergeError::MissingFile { .. })
    }
}
