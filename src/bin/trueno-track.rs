//! `trueno-track` - load `config.yaml` and open a tracked run
//!
//! Run with: `trueno-track --mode fold --config config.yaml`

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use trueno_track::config::{LoadMode, DEFAULT_CONFIG_FILE};
use trueno_track::experiment::LocalTracker;
use trueno_track::naming::RunMode;
use trueno_track::session::launch;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ModeArg {
    /// Name the run after the experiment and close the session
    #[default]
    Standalone,
    /// Append `_fold{k}` to the run name and leave the session open
    Fold,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standalone => Self::Standalone,
            ModeArg::Fold => Self::CrossValidationFold,
        }
    }
}

#[derive(Parser)]
#[command(name = "trueno-track")]
#[command(author, version, about = "Open an experiment-tracking run from config.yaml", long_about = None)]
struct Cli {
    /// Config file, relative to the base directory
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Naming and lifecycle mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Standalone)]
    mode: ModeArg,

    /// Resolve the config against this directory instead of the default
    /// (executable directory for `standalone`, working directory for `fold`)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Directory for local run snapshots
    #[arg(long, default_value = "tracking")]
    store_dir: PathBuf,
}

fn load_mode(cli: &Cli, run_mode: RunMode) -> anyhow::Result<LoadMode> {
    if let Some(base_dir) = &cli.base_dir {
        return Ok(LoadMode::relative_to_self(base_dir));
    }
    match run_mode {
        RunMode::Standalone => {
            let exe = std::env::current_exe().context("locating the executable")?;
            let base_dir = exe
                .parent()
                .context("executable has no parent directory")?
                .to_path_buf();
            Ok(LoadMode::relative_to_self(base_dir))
        }
        RunMode::CrossValidationFold => Ok(LoadMode::RelativeToCwd),
    }
}

/// `RUST_LOG` directives, or `info` when unset, blank or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();
    let run_mode = RunMode::from(cli.mode);
    let load_mode = load_mode(&cli, run_mode)?;

    let mut tracker = LocalTracker::open(&cli.store_dir)?;
    let (_config, run) = launch(&load_mode, &cli.config, run_mode, &mut tracker)?;

    println!(
        "{} {} (project={}, group={}, finished={})",
        run.session().run_id(),
        run.name(),
        run.project(),
        run.group(),
        run.is_finished()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trueno-track").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_explicit_base_dir_wins_in_both_modes() {
        for mode in ["standalone", "fold"] {
            let cli = parse(&["--mode", mode, "--base-dir", "/srv/exp001"]);
            let run_mode = RunMode::from(cli.mode);
            assert_eq!(
                load_mode(&cli, run_mode).unwrap(),
                LoadMode::relative_to_self("/srv/exp001")
            );
        }
    }

    #[test]
    fn test_standalone_defaults_to_executable_dir() {
        let cli = parse(&[]);
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(
            load_mode(&cli, RunMode::from(cli.mode)).unwrap(),
            LoadMode::relative_to_self(exe_dir)
        );
    }

    #[test]
    fn test_fold_defaults_to_working_dir() {
        let cli = parse(&["--mode", "fold"]);
        assert_eq!(
            load_mode(&cli, RunMode::from(cli.mode)).unwrap(),
            LoadMode::RelativeToCwd
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(cli.store_dir, PathBuf::from("tracking"));
        assert_eq!(RunMode::from(cli.mode), RunMode::Standalone);
    }

    #[test]
    fn test_log_filter_honors_rust_log_level() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
