//! Per-run log file using tracing
//!
//! The caller creates one [`RunLog`] at process start. Library code only emits
//! `tracing` events; where they end up is decided by whoever installs the dispatch.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, Dispatch};
use tracing_subscriber::fmt::time::ChronoLocal;

/// Default directory for run logs
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Timestamped append-only log file for a single run
pub struct RunLog {
    path: PathBuf,
    dispatch: Dispatch,
}

impl RunLog {
    /// Create `log_dir` if needed and open a new `YYYY_MM_DD_HH_MM_SS.log` file in it.
    pub fn create(log_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let file_name = format!("{}.log", Local::now().format("%Y_%m_%d_%H_%M_%S"));
        let path = log_dir.join(file_name);

        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_timer(ChronoLocal::new("[%Y-%m-%d %H:%M:%S]".to_string()))
            .with_target(true)
            .with_line_number(true)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let log = Self {
            path,
            dispatch: Dispatch::new(subscriber),
        };

        tracing::dispatcher::with_default(&log.dispatch, || {
            info!("Logging initialized. Log file: {}", log.path.display());
        });

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Route all events of this process to the log file.
    pub fn install(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .context("A global tracing subscriber is already installed")?;
        Ok(())
    }

    /// Run `f` with events routed to this log file on the current thread only.
    pub fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}
