//! Experiment Tracking Schema and local backend
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRecord (1) ──< RunRecord (N)
//!  (group name)              (project, name, status, config)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trueno_track::config::RunConfig;
//! use trueno_track::experiment::{LocalTracker, RunStatus};
//! use trueno_track::naming::RunMode;
//! use trueno_track::session::initialize;
//!
//! let config = RunConfig::from_yaml_str("project: demo\nexperiment_name: baseline\n")?;
//! let mut tracker = LocalTracker::in_memory();
//!
//! let run = initialize(&config, RunMode::Standalone, &mut tracker)?;
//! let record = tracker.store().get_run(run.session().run_id()).unwrap();
//! assert_eq!(record.status(), RunStatus::Success);
//! # Ok::<(), trueno_track::Error>(())
//! ```

mod experiment_record;
mod local;
mod run_record;
mod store;

pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder};
pub use local::LocalTracker;
pub use run_record::{RunRecord, RunRecordBuilder, RunStatus};
pub use store::ExperimentStore;
