pub mod apply;
pub mod check;
pub mod ensure;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::config::Manifest;
use crate::logging::{Logger, ResourceStatus};
use crate::resources::file_line::FileLineResource;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// What a run does with resources that are out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write the changes.
    Apply,
    /// Log the changes that would be written.
    DryRun,
    /// Report drift and fail if there is any.
    Check,
}

impl Mode {
    /// Pick `Apply` or `DryRun` from the global flag.
    #[must_use]
    pub const fn converge(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Apply }
    }
}

/// Load the manifest at `path`, report its warnings, and compile every
/// declaration.
///
/// Every pattern is compiled before any target file is touched, so a bad
/// regular expression anywhere aborts the whole run.
///
/// # Errors
///
/// Returns an error if the manifest cannot be parsed or any declaration is
/// invalid.
pub fn load_resources(path: &Path, log: &Logger) -> Result<Vec<FileLineResource>> {
    log.stage("Loading manifest");
    let manifest = Manifest::load(path)?;
    log.info(&format!(
        "loaded {} declaration(s) from {}",
        manifest.entries.len(),
        path.display()
    ));
    build_resources(&manifest, log)
}

/// Report validation warnings for `manifest` and compile its declarations.
///
/// # Errors
///
/// Returns an error naming the declaration whose pattern does not compile.
pub fn build_resources(manifest: &Manifest, log: &Logger) -> Result<Vec<FileLineResource>> {
    let warnings = manifest.validate();
    if !warnings.is_empty() {
        log.warn(&format!(
            "found {} configuration warning(s):",
            warnings.len()
        ));
        for warning in &warnings {
            log.warn(&format!(
                "  {} [{}]: {}",
                warning.source, warning.item, warning.message
            ));
        }
    }

    manifest
        .entries
        .iter()
        .map(|entry| {
            FileLineResource::from_entry(entry)
                .with_context(|| format!("invalid declaration '{}'", entry.label()))
        })
        .collect()
}

/// Process every resource in order, print the summary, and bail if any
/// resource failed (or, in check mode, is out of sync).
///
/// # Errors
///
/// Returns an error if one or more resources recorded a failure or drift.
pub fn run_to_completion<R: Resource>(resources: &[R], mode: Mode, log: &Logger) -> Result<()> {
    for resource in resources {
        process(resource, mode, log);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} resource(s) failed");
    }
    let drifted = log.count(ResourceStatus::Drifted);
    if drifted > 0 {
        anyhow::bail!("{drifted} resource(s) out of sync");
    }
    Ok(())
}

/// Process one resource and record its outcome; errors never stop the run.
pub fn process<R: Resource>(resource: &R, mode: Mode, log: &Logger) {
    let desc = resource.description();
    match process_one(resource, mode, log) {
        Ok(status) => log.record(&desc, status, None),
        Err(e) => {
            let msg = format!("{e:#}");
            log.error(&format!("{desc}: {msg}"));
            log.record(&desc, ResourceStatus::Failed, Some(&msg));
        }
    }
}

fn process_one<R: Resource>(resource: &R, mode: Mode, log: &Logger) -> Result<ResourceStatus> {
    let desc = resource.description();
    let state = resource.current_state()?;
    log.debug(&format!("{desc} state={state:?}"));
    if state == ResourceState::Correct {
        return Ok(ResourceStatus::Ok);
    }

    if mode == Mode::Apply {
        return Ok(match resource.apply()? {
            ResourceChange::Applied => {
                log.info(&format!("changed: {desc}"));
                ResourceStatus::Changed
            }
            ResourceChange::AlreadyCorrect => {
                log.debug(&format!("no effect: {desc}"));
                ResourceStatus::Ok
            }
        });
    }

    // A missing line may still be left alone by the placement policy.
    if !resource.would_change()? {
        log.debug(&format!("no effect: {desc}"));
        return Ok(ResourceStatus::Ok);
    }
    let msg = match state {
        ResourceState::Incorrect { current } => format!("{desc} (currently {current})"),
        _ => desc,
    };
    if mode == Mode::DryRun {
        log.dry_run(&format!("would update {msg}"));
        Ok(ResourceStatus::DryRun)
    } else {
        log.warn(&format!("out of sync: {msg}"));
        Ok(ResourceStatus::Drifted)
    }
}
