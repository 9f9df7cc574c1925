//! Experiment Store - in-memory storage for experiment tracking data

use std::collections::HashMap;

use super::{ExperimentRecord, RunRecord};

/// In-memory store for experiment tracking data.
///
/// Hash maps give O(1) lookups by ID; runs of a group are found by a scan
/// and returned in run-ID order.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    experiments: HashMap<String, ExperimentRecord>,
    runs: HashMap<String, RunRecord>,
}

impl ExperimentStore {
    /// Create a new empty experiment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store is empty (no experiments or runs).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.runs.is_empty()
    }

    /// Get the number of experiments in the store.
    #[must_use]
    pub fn experiment_count(&self) -> usize {
        self.experiments.len()
    }

    /// Get the number of runs in the store.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Add an experiment unless one with the same ID exists.
    ///
    /// Returns `true` if the record was inserted.
    pub fn add_experiment(&mut self, experiment: ExperimentRecord) -> bool {
        if self.experiments.contains_key(experiment.experiment_id()) {
            return false;
        }
        self.experiments
            .insert(experiment.experiment_id().to_string(), experiment);
        true
    }

    /// Get an experiment by ID.
    #[must_use]
    pub fn get_experiment(&self, experiment_id: &str) -> Option<&ExperimentRecord> {
        self.experiments.get(experiment_id)
    }

    /// Add (or replace) a run.
    pub fn add_run(&mut self, run: RunRecord) {
        self.runs.insert(run.run_id().to_string(), run);
    }

    /// Get a run by ID.
    #[must_use]
    pub fn get_run(&self, run_id: &str) -> Option<&RunRecord> {
        self.runs.get(run_id)
    }

    /// Get a mutable run by ID.
    pub fn get_run_mut(&mut self, run_id: &str) -> Option<&mut RunRecord> {
        self.runs.get_mut(run_id)
    }

    /// Get all runs for an experiment, ordered by run ID.
    #[must_use]
    pub fn get_runs_for_experiment(&self, experiment_id: &str) -> Vec<&RunRecord> {
        let mut runs: Vec<&RunRecord> = self
            .runs
            .values()
            .filter(|run| run.experiment_id() == experiment_id)
            .collect();
        runs.sort_by(|a, b| a.run_id().cmp(b.run_id()));
        runs
    }
}
