//! Config Loader - `config.yaml` resolution and parsing
//!
//! The loader never touches process state: the base directory a relative
//! config path is resolved against is carried explicitly in [`LoadMode`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use trueno_track::config::{load, LoadMode};
//!
//! let mode = LoadMode::relative_to_self("experiments/exp001");
//! let config = load(&mode, Path::new("config.yaml"))?;
//! println!("project = {}", config.project()?);
//! # Ok::<(), trueno_track::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Key holding the tracking project namespace
pub const PROJECT_KEY: &str = "project";

/// Key holding the experiment (group) name
pub const EXPERIMENT_NAME_KEY: &str = "experiment_name";

/// Key holding the cross-validation fold identifier
pub const FOLD_KEY: &str = "fold";

const INLINE_SOURCE: &str = "<inline>";

/// How a relative config path is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMode {
    /// Resolve against an explicit base directory (the launcher's own location)
    RelativeToSelf {
        /// Directory the config lives in
        base_dir: PathBuf,
    },
    /// Resolve against the working directory the process inherited
    RelativeToCwd,
}

impl LoadMode {
    /// Shorthand for [`LoadMode::RelativeToSelf`].
    #[must_use]
    pub fn relative_to_self(base_dir: impl Into<PathBuf>) -> Self {
        Self::RelativeToSelf {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve `file` to the path that will be read.
    ///
    /// Absolute paths are returned unchanged in both modes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the current working directory cannot be read
    /// in [`LoadMode::RelativeToCwd`].
    pub fn resolve(&self, file: &Path) -> Result<PathBuf> {
        if file.is_absolute() {
            return Ok(file.to_path_buf());
        }
        match self {
            Self::RelativeToSelf { base_dir } => Ok(base_dir.join(file)),
            Self::RelativeToCwd => Ok(std::env::current_dir()?.join(file)),
        }
    }
}

/// Parsed experiment-run configuration.
///
/// Immutable once loaded: only read accessors are exposed. Keys keep the
/// order they had in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunConfig {
    entries: Map<String, Value>,
}

impl RunConfig {
    /// Wrap an already-built mapping.
    #[must_use]
    pub const fn from_map(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Parse a YAML document that did not come from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the text is not a YAML mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse(Path::new(INLINE_SOURCE), content)
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Check whether a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the config has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the full mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Copy the full mapping into a JSON object, as recorded by trackers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    /// The `project` key.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] if absent or empty, [`Error::InvalidField`]
    /// if not a string.
    pub fn project(&self) -> Result<&str> {
        self.require_str(PROJECT_KEY)
    }

    /// The `experiment_name` key.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] if absent or empty, [`Error::InvalidField`]
    /// if not a string.
    pub fn experiment_name(&self) -> Result<&str> {
        self.require_str(EXPERIMENT_NAME_KEY)
    }

    /// Fetch a required, non-empty string value.
    ///
    /// A key written as `key:` with no value (YAML null) counts as missing.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] if absent, null or blank, [`Error::InvalidField`]
    /// for any non-string value.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Err(Error::missing(key)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(Error::missing(key)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(Error::invalid(
                key,
                format!("expected a string, found {}", value_kind(other)),
            )),
        }
    }
}

/// Short type name of a JSON value for diagnostics.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Resolve, read and parse a config file.
///
/// # Errors
///
/// - [`Error::ConfigNotFound`] if the resolved path is not an existing file
/// - [`Error::ConfigParse`] if the content is not a YAML mapping
/// - [`Error::Io`] for any other read failure
pub fn load(mode: &LoadMode, file: &Path) -> Result<RunConfig> {
    let path = mode.resolve(file)?;
    debug!(path = %path.display(), ?mode, "resolved config path");

    if !path.is_file() {
        return Err(Error::ConfigNotFound { path });
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ConfigNotFound { path });
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let config = parse(&path, &content)?;
    debug!(path = %path.display(), keys = config.len(), "loaded config");
    Ok(config)
}

fn parse(path: &Path, content: &str) -> Result<RunConfig> {
    let parse_error = |reason: String| Error::ConfigParse {
        path: path.to_path_buf(),
        reason,
    };

    if content.trim().is_empty() {
        return Ok(RunConfig::default());
    }

    let document: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;

    let mapping = match document {
        // Comment-only document
        serde_yaml::Value::Null => return Ok(RunConfig::default()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => {
            return Err(parse_error(format!(
                "top-level document must be a mapping, found {}",
                yaml_kind(&other)
            )))
        }
    };

    let mut entries = Map::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            other => {
                return Err(parse_error(format!(
                    "mapping keys must be scalars, found {}",
                    yaml_kind(&other)
                )))
            }
        };
        let value = serde_json::to_value(&value)
            .map_err(|e| parse_error(format!("value of `{key}`: {e}")))?;
        entries.insert(key, value);
    }

    Ok(RunConfig::from_map(entries))
}

const fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
