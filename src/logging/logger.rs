//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{ResourceEntry, ResourceStatus};
use super::utils::log_file_path;

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/file-line/<command>.log` (default
/// `~/.cache/file-line/<command>.log`) by the subscriber installed with
/// [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    resources: Mutex<Vec<ResourceEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the run summary; this
    /// constructor does not write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            resources: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<ResourceEntry> {
        self.resources.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "file_line::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "file_line::dry_run", "{msg}");
    }

    /// Record a resource result for the summary.
    pub fn record(&self, name: &str, status: ResourceStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.resources.lock() {
            guard.push(ResourceEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded resource has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed resources.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(ResourceStatus::Failed)
    }

    /// Count the resources recorded with `status`.
    #[must_use]
    pub fn count(&self, status: ResourceStatus) -> usize {
        self.resources
            .lock()
            .map_or(0, |guard| guard.iter().filter(|r| r.status == status).count())
    }

    /// Print the summary of all recorded resources.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut changed = 0u32;
        let mut dry_run = 0u32;
        let mut drifted = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                ResourceStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                ResourceStatus::Changed => {
                    changed += 1;
                    ("+", "\x1b[36m")
                }
                ResourceStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                ResourceStatus::Drifted => {
                    drifted += 1;
                    ("!", "\x1b[33m")
                }
                ResourceStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + changed + dry_run + drifted + failed;
        self.info(&format!(
            "{total} resources: \x1b[32m{ok} ok\x1b[0m, \x1b[36m{changed} changed\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[33m{drifted} drifted\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}
