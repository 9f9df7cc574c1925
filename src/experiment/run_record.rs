//! Run Record - one tracked execution of an experiment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is created but not yet started.
    Pending,
    /// Run is currently executing.
    Running,
    /// Run completed successfully.
    Success,
    /// Run failed with an error.
    Failed,
    /// Run was cancelled by user or system.
    Cancelled,
}

impl RunStatus {
    /// Whether the run has reached a final status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Cancelled)
    }
}

/// Run Record represents a single execution of an experiment.
///
/// Carries everything a session start records: project, group, derived
/// name and the verbatim configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    run_id: String,
    experiment_id: String,
    project: String,
    name: String,
    status: RunStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    config: serde_json::Value,
}

impl RunRecord {
    /// Create a new run record in Pending status with an empty config.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Unique identifier for the run
    /// * `experiment_id` - Group the run belongs to
    #[must_use]
    pub fn new(run_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        RunRecordBuilder::new(run_id, experiment_id).build()
    }

    /// Create a builder for constructing a run record with optional fields.
    #[must_use]
    pub fn builder(
        run_id: impl Into<String>,
        experiment_id: impl Into<String>,
    ) -> RunRecordBuilder {
        RunRecordBuilder::new(run_id, experiment_id)
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the parent experiment ID (group name).
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the project namespace.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Get the human-readable run name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current run status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Get the start timestamp, if the run has started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the end timestamp, if the run has completed.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Get the recorded configuration.
    #[must_use]
    pub const fn config(&self) -> &serde_json::Value {
        &self.config
    }

    /// Start the run, transitioning from Pending to Running.
    ///
    /// Sets the `started_at` timestamp to now.
    pub fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Complete the run with the given final status.
    ///
    /// Sets the `ended_at` timestamp to now.
    pub fn complete(&mut self, status: RunStatus) {
        self.status = status;
        self.ended_at = Some(Utc::now());
    }
}

/// Builder for `RunRecord`.
#[derive(Debug)]
pub struct RunRecordBuilder {
    record: RunRecord,
}

impl RunRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(run_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        let experiment_id = experiment_id.into();
        Self {
            record: RunRecord {
                run_id: run_id.into(),
                name: experiment_id.clone(),
                experiment_id,
                project: String::new(),
                status: RunStatus::Pending,
                started_at: None,
                ended_at: None,
                config: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }

    /// Set the project namespace.
    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.record.project = project.into();
        self
    }

    /// Set the run name (defaults to the experiment ID).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.name = name.into();
        self
    }

    /// Set the recorded configuration.
    #[must_use]
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.record.config = config;
        self
    }

    /// Build the `RunRecord`.
    #[must_use]
    pub fn build(self) -> RunRecord {
        self.record
    }
}
