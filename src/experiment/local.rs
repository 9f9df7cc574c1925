//! Local Tracker - [`Tracker`] backed by [`ExperimentStore`]
//!
//! Optionally mirrors every run to `<dir>/<run_id>.json` so a finished
//! launch leaves an inspectable record behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use tracing::debug;

use super::{ExperimentRecord, ExperimentStore, RunRecord, RunStatus};
use crate::tracker::{InitRequest, SessionHandle, Tracker};
use crate::Result;

const RUN_PREFIX: &str = "run-";
const SNAPSHOT_EXT: &str = "json";

/// Tracking backend that records runs locally.
#[derive(Debug, Default)]
pub struct LocalTracker {
    store: ExperimentStore,
    dir: Option<PathBuf>,
    last_seq: u64,
}

impl LocalTracker {
    /// Tracker that keeps everything in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Tracker that also writes run snapshots under `dir`.
    ///
    /// The directory is created if needed. Run IDs continue after the
    /// highest `run-NNNN.json` already present, so earlier snapshots are
    /// never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the directory cannot be
    /// created or listed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut last_seq = 0;
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if let Some(seq) = snapshot_seq(&path) {
                last_seq = last_seq.max(seq);
            }
        }
        debug!(dir = %dir.display(), last_seq, "opened local tracking directory");

        Ok(Self {
            store: ExperimentStore::new(),
            dir: Some(dir),
            last_seq,
        })
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &ExperimentStore {
        &self.store
    }

    /// Snapshot directory, if persistent.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Path of the snapshot for `run_id`, if persistent.
    #[must_use]
    pub fn snapshot_path(&self, run_id: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{run_id}.{SNAPSHOT_EXT}")))
    }

    /// Read back a snapshot written by a persistent tracker.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) or
    /// [`Error::Serialization`](crate::Error::Serialization).
    pub fn read_snapshot(path: &Path) -> Result<RunRecord> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Close an open session with an explicit final status.
    ///
    /// # Errors
    ///
    /// Fails for an unknown run, a non-terminal `status`, a run that is
    /// already closed, or a snapshot write failure.
    pub fn complete(&mut self, session: &SessionHandle, status: RunStatus) -> anyhow::Result<()> {
        if !status.is_terminal() {
            bail!("{status:?} is not a final run status");
        }
        let run_id = session.run_id();
        let mut run = self
            .store
            .get_run(run_id)
            .ok_or_else(|| anyhow!("unknown run `{run_id}`"))?
            .clone();
        if run.status().is_terminal() {
            bail!("run `{run_id}` already finished as {:?}", run.status());
        }
        run.complete(status);

        // Store is updated only after the snapshot is written
        self.persist(&run)
            .with_context(|| format!("writing snapshot for `{run_id}`"))?;
        self.store.add_run(run);
        debug!(run_id, ?status, "run completed");
        Ok(())
    }

    fn persist(&self, run: &RunRecord) -> Result<()> {
        let Some(path) = self.snapshot_path(run.run_id()) else {
            return Ok(());
        };
        fs::write(&path, serde_json::to_string_pretty(run)?)?;
        debug!(path = %path.display(), "wrote run snapshot");
        Ok(())
    }
}

impl Tracker for LocalTracker {
    fn init(&mut self, request: &InitRequest<'_>) -> anyhow::Result<SessionHandle> {
        let run_id = format!("{RUN_PREFIX}{:04}", self.last_seq + 1);
        let config = request.config.to_value();

        let mut run = RunRecord::builder(&run_id, request.group)
            .project(request.project)
            .name(request.name)
            .config(config.clone())
            .build();
        run.start();
        self.persist(&run)
            .with_context(|| format!("writing snapshot for `{run_id}`"))?;

        self.last_seq += 1;
        self.store.add_experiment(
            ExperimentRecord::builder(request.group, request.project)
                .config(config)
                .build(),
        );
        self.store.add_run(run);
        Ok(SessionHandle::new(run_id))
    }

    fn finish(&mut self, session: &SessionHandle) -> anyhow::Result<()> {
        self.complete(session, RunStatus::Success)
    }
}

/// `run-0042.json` → `Some(42)`
fn snapshot_seq(path: &Path) -> Option<u64> {
    if path.extension()? != SNAPSHOT_EXT {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix(RUN_PREFIX)?
        .parse()
        .ok()
}
