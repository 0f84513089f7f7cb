//! Command: converge every declaration in a manifest.
use anyhow::Result;

use super::Mode;
use crate::cli::{GlobalOpts, ManifestOpts};
use crate::logging::Logger;

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if the manifest is invalid or any resource fails.
pub fn run(global: &GlobalOpts, opts: &ManifestOpts, log: &Logger) -> Result<()> {
    log.info(&format!("file-line {}", super::version::version()));
    let resources = super::load_resources(&opts.manifest, log)?;

    let mode = Mode::converge(global.dry_run);
    log.stage(if mode == Mode::DryRun {
        "Applying (dry run)"
    } else {
        "Applying"
    });
    super::run_to_completion(&resources, mode, log)
}
