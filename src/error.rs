//! Error types for Trueno-Track
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trueno-Track error types
///
/// Every variant is fatal: no retry, no default substitution.
#[derive(Error, Debug)]
pub enum Error {
    /// Resolved config path does not point at an existing file
    #[error("Config file not found: {}\nCheck the base directory or run from the directory holding the config", path.display())]
    ConfigNotFound {
        /// Fully resolved path that was checked
        path: PathBuf,
    },

    /// Config content is not a valid YAML mapping
    #[error("Config parse error in {}: {reason}", path.display())]
    ConfigParse {
        /// Path of the offending file
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },

    /// Required config key is absent or empty
    #[error("Missing required config field: `{field}`")]
    MissingField {
        /// Key name
        field: String,
    },

    /// Config key is present but has an unusable type
    #[error("Invalid config field `{field}`: {reason}")]
    InvalidField {
        /// Key name
        field: String,
        /// What was wrong with the value
        reason: String,
    },

    /// Tracking backend refused to start a session
    #[error("Tracker initialization failed for project `{project}`: {reason}")]
    TrackerInit {
        /// Project the session was requested for
        project: String,
        /// Backend diagnostic
        reason: String,
    },

    /// Tracking backend failed to finalize a session
    #[error("Tracker finish failed for run `{run_id}`: {reason}")]
    TrackerFinish {
        /// Backend run identifier
        run_id: String,
        /// Backend diagnostic
        reason: String,
    },

    /// IO error
    ///
    /// The inner error is rendered in the message and not exposed as a
    /// source, so `{:#}` chains print it once.
    #[error("IO error: {0}")]
    Io(std::io::Error),

    /// JSON serialization error (run snapshots)
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

impl Error {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
