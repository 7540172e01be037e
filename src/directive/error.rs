//! Errors raised while collecting directives.

use std::path::PathBuf;
use thiserror::Error;

/// DirectiveError describes a directive source that could not be read.
///
/// Directive *values* never fail: any text is a valid raw value. Only the
/// containers they arrive in can be malformed.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("invalid directive {pair:?}: {reason}")]
    InvalidPair { pair: String, reason: &'static str },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}: {message}")]
    Parse { origin: String, message: String },
}

impl DirectiveError {
    /// Creates an invalid pair error.
    pub fn invalid_pair(pair: impl Into<String>, reason: &'static str) -> Self {
        DirectiveError::InvalidPair {
            pair: pair.into(),
            reason,
        }
    }

    /// Creates a parse error for the named source.
    pub fn parse(origin: impl Into<String>, message: impl std::fmt::Display) -> Self {
        DirectiveError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}
