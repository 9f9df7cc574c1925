//! Tracking backend seam
//!
//! The initializer depends only on this two-operation contract; any backend
//! implementing [`Tracker`] is substitutable. [`LocalTracker`] is the bundled
//! implementation.
//!
//! [`LocalTracker`]: crate::experiment::LocalTracker

use crate::config::RunConfig;
use serde::{Deserialize, Serialize};

/// Arguments of a session start.
#[derive(Debug, Clone, Copy)]
pub struct InitRequest<'a> {
    /// Tracking project namespace
    pub project: &'a str,
    /// Group of related runs (the experiment name)
    pub group: &'a str,
    /// Derived run name
    pub name: &'a str,
    /// Full configuration, recorded verbatim
    pub config: &'a RunConfig,
}

/// Opaque handle to a session owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle {
    run_id: String,
}

impl SessionHandle {
    /// Wrap a backend run identifier.
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
        }
    }

    /// Backend run identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

/// Experiment-tracking backend.
///
/// Implementors report failures through `anyhow`; the initializer wraps them
/// into [`Error::TrackerInit`](crate::Error::TrackerInit) and
/// [`Error::TrackerFinish`](crate::Error::TrackerFinish).
pub trait Tracker {
    /// Start a tracking session and record the configuration.
    ///
    /// # Errors
    ///
    /// Any backend failure (authentication, storage, network).
    fn init(&mut self, request: &InitRequest<'_>) -> anyhow::Result<SessionHandle>;

    /// Finalize a session started by [`Tracker::init`].
    ///
    /// # Errors
    ///
    /// Any backend failure, including an unknown or already closed session.
    fn finish(&mut self, session: &SessionHandle) -> anyhow::Result<()>;
}
