//! Host-supplied node attributes.

use super::{parse_version, supports_overrides, DirectiveError, Directives};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// NodeVersion is the version attribute as the inventory recorded it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeVersion {
    Number(f64),
    Text(String),
}

impl NodeVersion {
    /// Numeric view of the version; see [`parse_version`] for text.
    pub fn as_f64(&self) -> f64 {
        match self {
            NodeVersion::Number(n) => *n,
            NodeVersion::Text(s) => parse_version(s),
        }
    }
}

impl Default for NodeVersion {
    fn default() -> Self {
        NodeVersion::Number(0.0)
    }
}

/// NodeAttributes are the facts a caller knows about the target node.
///
/// ```yaml
/// version: "2.1"
/// config_directives:
///   num_tokens: "256"
///   concurrent_reads: "64"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeAttributes {
    #[serde(default)]
    pub version: NodeVersion,

    #[serde(default)]
    pub config_directives: Option<Directives>,
}

impl NodeAttributes {
    /// Parses attributes from YAML or JSON text.
    pub fn from_yaml_str(text: &str) -> Result<NodeAttributes, DirectiveError> {
        if text.trim().is_empty() {
            return Ok(NodeAttributes::default());
        }
        serde_yaml::from_str(text).map_err(|e| DirectiveError::parse("node attributes", e))
    }

    /// Reads an attributes file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<NodeAttributes, DirectiveError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DirectiveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        NodeAttributes::from_yaml_str(&text).map_err(|e| match e {
            DirectiveError::Parse { message, .. } => {
                DirectiveError::parse(path.display().to_string(), message)
            }
            other => other,
        })
    }

    pub fn version(&self) -> f64 {
        self.version.as_f64()
    }

    /// The directive map, empty if the attribute is absent.
    pub fn directives(&self) -> Directives {
        self.config_directives.clone().unwrap_or_default()
    }

    /// Returns true if this node's directives should be merged.
    pub fn directives_supported(&self) -> bool {
        match &self.config_directives {
            Some(directives) => supports_overrides(self.version(), directives),
            None => false,
        }
    }
}
