//! Run naming - derives the tracked run name from a [`RunConfig`]
//!
//! | mode                  | run name                  | finalize |
//! |-----------------------|---------------------------|----------|
//! | `Standalone`          | `experiment_name`         | yes      |
//! | `CrossValidationFold` | `experiment_name_fold{k}` | no       |

use crate::config::{value_kind, RunConfig, FOLD_KEY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Naming and lifecycle behavior of a launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Single run named after the experiment; the session is finalized
    /// before returning.
    #[default]
    Standalone,
    /// One fold of a cross-validation sweep; the session stays open for the
    /// caller.
    CrossValidationFold,
}

impl RunMode {
    /// Whether the initializer closes the session itself.
    #[must_use]
    pub const fn finalizes(self) -> bool {
        matches!(self, Self::Standalone)
    }

    /// Whether the config must carry a `fold` key.
    #[must_use]
    pub const fn requires_fold(self) -> bool {
        matches!(self, Self::CrossValidationFold)
    }

    /// Derive the run name for `config`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] when `experiment_name` (or `fold` in
    /// cross-validation mode) is absent, [`Error::InvalidField`] when either
    /// has an unusable type.
    pub fn run_name(self, config: &RunConfig) -> Result<String> {
        let experiment_name = config.experiment_name()?;
        match self {
            Self::Standalone => Ok(experiment_name.to_string()),
            Self::CrossValidationFold => {
                let fold = FoldId::from_config(config)?;
                Ok(fold_run_name(experiment_name, &fold))
            }
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => f.write_str("standalone"),
            Self::CrossValidationFold => f.write_str("cross_validation_fold"),
        }
    }
}

/// Cross-validation partition identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FoldId {
    /// Numeric partition index (`fold: 3`)
    Index(i64),
    /// Named partition (`fold: "holdout"`)
    Label(String),
}

impl FoldId {
    /// Read the `fold` key.
    ///
    /// # Errors
    ///
    /// [`Error::MissingField`] if absent, null or blank; [`Error::InvalidField`]
    /// for non-integer numbers and non-scalar values.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        match config.get(FOLD_KEY) {
            None | Some(Value::Null) => Err(Error::missing(FOLD_KEY)),
            Some(Value::Number(n)) => n.as_i64().map(Self::Index).ok_or_else(|| {
                Error::invalid(FOLD_KEY, format!("expected an integer, found {n}"))
            }),
            Some(Value::String(s)) if s.trim().is_empty() => Err(Error::missing(FOLD_KEY)),
            Some(Value::String(s)) => Ok(Self::Label(s.clone())),
            Some(other) => Err(Error::invalid(
                FOLD_KEY,
                format!("expected an integer or string, found {}", value_kind(other)),
            )),
        }
    }
}

impl fmt::Display for FoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FoldId {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for FoldId {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// `{experiment_name}_fold{fold}`
#[must_use]
pub fn fold_run_name(experiment_name: &str, fold: &FoldId) -> String {
    format!("{experiment_name}_fold{fold}")
}
