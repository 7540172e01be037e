//! Directive merger.
//!
//! Not safe to run twice at once against the same path: both runs race on
//! the rename. A crash between the rename and the final write leaves only
//! the backup file behind.

use super::MergeError;
use crate::coerce::coerce_with_rule;
use crate::directive::Directives;
use crate::value::{self, Map, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inserted before the extension of the config file name to name its backup.
pub const BACKUP_MARKER: &str = "_template";

const DEFAULT_TITLE: &str = "Cassandra storage config YAML";
const DEFAULT_REFERENCE: &str = "http://wiki.apache.org/cassandra/StorageConfiguration";
const DEFAULT_GENERATOR: &str = "directive-merge";

/// Derives the backup path of a config file.
///
/// The marker goes between the file stem and its extension, so
/// `/etc/cassandra/cassandra.yaml` backs up to
/// `/etc/cassandra/cassandra_template.yaml`. A name without an extension
/// gets the marker appended. Parent directories are left alone.
pub fn backup_path(config_path: impl AsRef<Path>) -> PathBuf {
    let config_path = config_path.as_ref();
    let Some(stem) = config_path.file_stem() else {
        let mut raw = config_path.as_os_str().to_os_string();
        raw.push(BACKUP_MARKER);
        return PathBuf::from(raw);
    };

    let mut name = OsString::from(stem);
    name.push(BACKUP_MARKER);
    if let Some(ext) = config_path.extension() {
        name.push(".");
        name.push(ext);
    }
    config_path.with_file_name(name)
}

/// MergeReport describes what a merge did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub config_path: PathBuf,
    pub backup_path: PathBuf,
    /// Every directive key written, in directive order.
    pub written: Vec<String>,
    /// The subset of `written` that was not in the document before.
    pub added: Vec<String>,
}

/// MergerBuilder configures the generated-file header.
#[derive(Debug, Clone)]
pub struct MergerBuilder {
    title: String,
    reference: Option<String>,
    generator: String,
}

impl Default for MergerBuilder {
    fn default() -> Self {
        MergerBuilder {
            title: DEFAULT_TITLE.to_string(),
            reference: Some(DEFAULT_REFERENCE.to_string()),
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }
}

impl MergerBuilder {
    /// Creates a new MergerBuilder with the default header.
    pub fn new() -> Self {
        MergerBuilder::default()
    }

    /// Sets the first header line.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the documentation link printed next to the backup path.
    pub fn reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    /// Sets the name in the "Auto generated by" line.
    pub fn generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Builds the Merger.
    pub fn build(self) -> Merger {
        Merger {
            title: self.title,
            reference: self.reference,
            generator: self.generator,
        }
    }
}

/// Merger writes directive overrides into config files.
#[derive(Debug, Clone)]
pub struct Merger {
    title: String,
    reference: Option<String>,
    generator: String,
}

impl Default for Merger {
    fn default() -> Self {
        MergerBuilder::default().build()
    }
}

impl Merger {
    /// Creates a new MergerBuilder.
    pub fn builder() -> MergerBuilder {
        MergerBuilder::new()
    }

    /// Renders the comment block written above the merged document.
    pub fn header(&self, backup: &Path) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", self.title));
        out.push_str("#\n");
        out.push_str("# NOTE:\n");
        match &self.reference {
            Some(reference) => {
                out.push_str(&format!("#   See {}\n", reference));
                out.push_str(&format!("#   or  {} file for full\n", backup.display()));
            }
            None => {
                out.push_str(&format!("#   See {} file for full\n", backup.display()));
            }
        }
        out.push_str("#   explanations of configuration directives\n");
        out.push_str("# /NOTE\n");
        out.push_str("#\n");
        out.push_str(&format!("# Auto generated by {}\n", self.generator));
        out
    }

    /// Merges `overrides` into the YAML file at `config_path`.
    ///
    /// The file is read, then renamed to [`backup_path`], so after a
    /// successful merge the backup holds the exact original bytes and
    /// `config_path` holds the header followed by the updated document. Keys
    /// not named by `overrides` keep their values and order. A path that
    /// cannot be read as a file (missing, unreadable, a directory) fails
    /// before anything is moved.
    pub fn merge(
        &self,
        config_path: impl AsRef<Path>,
        overrides: &Directives,
    ) -> Result<MergeReport, MergeError> {
        let config_path = config_path.as_ref();
        info!(
            config = %config_path.display(),
            directives = ?overrides.keys().collect::<Vec<_>>(),
            "merging config directives"
        );

        let text = fs::read_to_string(config_path).map_err(|source| MergeError::MissingFile {
            path: config_path.to_path_buf(),
            source,
        })?;

        let backup = backup_path(config_path);
        fs::rename(config_path, &backup).map_err(|source| MergeError::Backup {
            from: config_path.to_path_buf(),
            to: backup.clone(),
            source,
        })?;
        info!(backup = %backup.display(), "moved original config aside");

        let mut document = parse_document(&text, &backup)?;

        let added = apply_directives(&mut document, overrides);
        let written: Vec<String> = overrides.keys().map(str::to_string).collect();

        let body = value::to_yaml(&Value::Map(document)).map_err(MergeError::Serialize)?;
        debug!(document = %body, "merged config");

        let mut output = self.header(&backup);
        output.push_str(&body);
        fs::write(config_path, output).map_err(|source| MergeError::Write {
            path: config_path.to_path_buf(),
            source,
        })?;
        info!(config = %config_path.display(), "saved merged config");

        Ok(MergeReport {
            config_path: config_path.to_path_buf(),
            backup_path: backup,
            written,
            added,
        })
    }
}

/// Merges `overrides` into the file at `config_path` with the default header.
///
/// See [`Merger::merge`].
pub fn merge(
    config_path: impl AsRef<Path>,
    overrides: &Directives,
) -> Result<MergeReport, MergeError> {
    Merger::default().merge(config_path, overrides)
}

/// Parses config text into its root mapping. An empty document is an empty
/// mapping.
pub fn parse_document(text: &str, path: &Path) -> Result<Map, MergeError> {
    let parsed = value::from_yaml(text).map_err(|source| MergeError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match parsed {
        Value::Map(m) => Ok(m),
        Value::Null => Ok(Map::new()),
        other => Err(MergeError::NotAMapping {
            path: path.to_path_buf(),
            found: other.kind(),
        }),
    }
}

/// Writes every coerced directive into `document` and returns the keys that
/// were not present before.
///
/// Existing keys are replaced in place; new keys are appended in directive
/// order.
pub fn apply_directives(document: &mut Map, overrides: &Directives) -> Vec<String> {
    let mut added = Vec::new();
    for (key, raw) in overrides.iter() {
        let (coerced, rule) = coerce_with_rule(raw);
        debug!(key, rule = %rule, kind = coerced.kind(), "applying directive");
        if document.set(key.to_string(), coerced).is_none() {
            added.push(key.to_string());
        }
    }
    added
}
