//! Experiment Record - one tracked group of runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Experiment Record represents a group of related runs.
///
/// Keyed by the group name (the config's `experiment_name`). The config of
/// the first run that opened the group is kept for reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentRecord {
    experiment_id: String,
    project: String,
    created_at: DateTime<Utc>,
    config: Option<serde_json::Value>,
}

impl ExperimentRecord {
    /// Create a new experiment record.
    ///
    /// # Arguments
    ///
    /// * `experiment_id` - Group name
    /// * `project` - Tracking project namespace
    #[must_use]
    pub fn new(experiment_id: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            project: project.into(),
            created_at: Utc::now(),
            config: None,
        }
    }

    /// Create a builder for constructing an experiment record with optional fields.
    #[must_use]
    pub fn builder(
        experiment_id: impl Into<String>,
        project: impl Into<String>,
    ) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(experiment_id, project)
    }

    /// Get the experiment ID (group name).
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the project namespace.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the experiment configuration, if any.
    #[must_use]
    pub const fn config(&self) -> Option<&serde_json::Value> {
        self.config.as_ref()
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    record: ExperimentRecord,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            record: ExperimentRecord::new(experiment_id, project),
        }
    }

    /// Set the experiment configuration.
    #[must_use]
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.record.config = Some(config);
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.record.created_at = created_at;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        self.record
    }
}
