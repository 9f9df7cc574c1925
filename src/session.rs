//! Run Namer & Tracker Initializer
//!
//! One linear sequence per invocation: load → derive name → init →
//! (optionally) finish. Validation happens before the backend is touched, so
//! a bad config never creates a tracking record.

use crate::config::{load, LoadMode, RunConfig};
use crate::naming::RunMode;
use crate::tracker::{InitRequest, SessionHandle, Tracker};
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Outcome of a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRun {
    project: String,
    group: String,
    name: String,
    mode: RunMode,
    session: SessionHandle,
    finished: bool,
}

impl TrackedRun {
    /// Project the session was opened in.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Group (experiment name).
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Derived run name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mode the run was launched in.
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Backend session handle.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Whether the session was already finalized.
    ///
    /// `false` in [`RunMode::CrossValidationFold`]: the caller owns the open
    /// session and is responsible for finishing it.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Start a tracking session for an already loaded config.
///
/// Calls [`Tracker::init`] exactly once and, in [`RunMode::Standalone`],
/// [`Tracker::finish`] exactly once afterwards. Backend failures are not
/// retried.
///
/// # Errors
///
/// - [`Error::MissingField`] / [`Error::InvalidField`] before any backend call
/// - [`Error::TrackerInit`] if the backend refuses the session
/// - [`Error::TrackerFinish`] if the backend fails to finalize it
pub fn initialize<T: Tracker + ?Sized>(
    config: &RunConfig,
    mode: RunMode,
    tracker: &mut T,
) -> Result<TrackedRun> {
    let project = config.project()?;
    let group = config.experiment_name()?;
    let name = mode.run_name(config)?;

    let request = InitRequest {
        project,
        group,
        name: &name,
        config,
    };
    let session = tracker.init(&request).map_err(|e| Error::TrackerInit {
        project: project.to_string(),
        reason: format!("{e:#}"),
    })?;
    info!(project, group, name = %name, run_id = session.run_id(), %mode, "tracking session started");

    let finished = if mode.finalizes() {
        tracker.finish(&session).map_err(|e| Error::TrackerFinish {
            run_id: session.run_id().to_string(),
            reason: format!("{e:#}"),
        })?;
        info!(run_id = session.run_id(), "tracking session finished");
        true
    } else {
        info!(run_id = session.run_id(), "session left open for caller");
        false
    };

    Ok(TrackedRun {
        project: project.to_string(),
        group: group.to_string(),
        name,
        mode,
        session,
        finished,
    })
}

/// Load the config file, then [`initialize`].
///
/// The backend is not called when loading fails.
///
/// # Errors
///
/// Any error of [`load`] or [`initialize`].
pub fn launch<T: Tracker + ?Sized>(
    load_mode: &LoadMode,
    file: &Path,
    run_mode: RunMode,
    tracker: &mut T,
) -> Result<(RunConfig, TrackedRun)> {
    let config = load(load_mode, file)?;
    let run = initialize(&config, run_mode, tracker)?;
    Ok((config, run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[derive(Default)]
    struct CountingTracker {
        inits: usize,
        finishes: usize,
        fail_init: bool,
        fail_finish: bool,
    }

    impl Tracker for CountingTracker {
        fn init(&mut self, _request: &InitRequest<'_>) -> anyhow::Result<SessionHandle> {
            self.inits += 1;
            if self.fail_init {
                bail!("invalid API key");
            }
            Ok(SessionHandle::new(format!("run-{}", self.inits)))
        }

        fn finish(&mut self, _session: &SessionHandle) -> anyhow::Result<()> {
            self.finishes += 1;
            if self.fail_finish {
                bail!("disk full");
            }
            Ok(())
        }
    }

    fn config() -> RunConfig {
        RunConfig::from_yaml_str("project: p\nexperiment_name: e\nfold: 2\n").unwrap()
    }

    #[test]
    fn test_standalone_finishes_once() {
        let mut tracker = CountingTracker::default();
        let run = initialize(&config(), RunMode::Standalone, &mut tracker).unwrap();
        assert_eq!((tracker.inits, tracker.finishes), (1, 1));
        assert!(run.is_finished());
        assert_eq!(run.name(), "e");
        assert_eq!(run.session().run_id(), "run-1");
    }

    #[test]
    fn test_fold_leaves_session_open() {
        let mut tracker = CountingTracker::default();
        let run = initialize(&config(), RunMode::CrossValidationFold, &mut tracker).unwrap();
        assert_eq!((tracker.inits, tracker.finishes), (1, 0));
        assert!(!run.is_finished());
        assert_eq!(run.name(), "e_fold2");
        assert_eq!(run.mode(), RunMode::CrossValidationFold);
    }

    #[test]
    fn test_init_failure_skips_finish() {
        let mut tracker = CountingTracker {
            fail_init: true,
            ..CountingTracker::default()
        };
        let err = initialize(&config(), RunMode::Standalone, &mut tracker).unwrap_err();
        assert!(matches!(err, Error::TrackerInit { .. }));
        assert!(err.to_string().contains("invalid API key"));
        assert_eq!((tracker.inits, tracker.finishes), (1, 0));
    }

    #[test]
    fn test_finish_failure_is_reported() {
        let mut tracker = CountingTracker {
            fail_finish: true,
            ..CountingTracker::default()
        };
        let err = initialize(&config(), RunMode::Standalone, &mut tracker).unwrap_err();
        assert!(matches!(err, Error::TrackerFinish { ref run_id, .. } if run_id == "run-1"));
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut tracker = CountingTracker::default();
        let dyn_tracker: &mut dyn Tracker = &mut tracker;
        initialize(&config(), RunMode::Standalone, dyn_tracker).unwrap();
        assert_eq!(tracker.inits, 1);
    }
}
