//! Command: report declarations that are out of sync.
use anyhow::Result;

use super::Mode;
use crate::cli::ManifestOpts;
use crate::logging::Logger;

/// Run the check command. Never writes; `--dry-run` has no extra effect.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, any resource cannot be
/// checked, or any resource is out of sync.
pub fn run(opts: &ManifestOpts, log: &Logger) -> Result<()> {
    let resources = super::load_resources(&opts.manifest, log)?;
    log.stage("Checking");
    super::run_to_completion(&resources, Mode::Check, log)
}
