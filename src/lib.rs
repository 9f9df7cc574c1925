//! # Trueno-Track: Experiment-Run Configuration Loader
//!
//! **Version**: 0.1.0
//!
//! Trueno-Track loads an experiment's `config.yaml`, derives the run name,
//! and opens a session on an experiment-tracking backend with the full
//! config recorded verbatim.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: Required fields are validated before the backend is
//!   touched; a bad config never creates a tracking record
//! - **Muda elimination**: One parameterized launcher ([`naming::RunMode`])
//!   instead of per-variant scripts
//! - **Genchi Genbutsu**: Config paths resolve against an explicit base
//!   directory, never a mutated process working directory
//! - **Jidoka**: Every failure is fatal and names the offending path or field
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use trueno_track::config::LoadMode;
//! use trueno_track::experiment::LocalTracker;
//! use trueno_track::naming::RunMode;
//! use trueno_track::session::launch;
//!
//! let mut tracker = LocalTracker::open("tracking")?;
//! let (_config, run) = launch(
//!     &LoadMode::relative_to_self("experiments/exp001"),
//!     Path::new("config.yaml"),
//!     RunMode::Standalone,
//!     &mut tracker,
//! )?;
//! println!("Run {} ({})", run.name(), run.session().run_id());
//! # Ok::<(), trueno_track::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod naming;
pub mod session;
pub mod tracker;

pub use config::{LoadMode, RunConfig};
pub use error::{Error, Result};
pub use naming::{FoldId, RunMode};
pub use session::{initialize, launch, TrackedRun};
pub use tracker::{InitRequest, SessionHandle, Tracker};
