//! Command: converge a single declaration given on the command line.
use anyhow::Result;

use super::Mode;
use crate::cli::{EnsureOpts, GlobalOpts};
use crate::config::Manifest;
use crate::config::file_lines::{FileLineOptions, Flag};
use crate::logging::Logger;

/// Convert command-line options into an unvalidated declaration.
#[must_use]
pub fn options(opts: &EnsureOpts) -> FileLineOptions {
    FileLineOptions {
        name: None,
        path: opts.path.clone(),
        line: opts.line.clone(),
        match_pattern: opts.match_pattern.clone(),
        after: opts.after.clone(),
        unless: opts.unless.clone(),
        multiple: opts.multiple.clone().map(Flag::Text),
        no_append: opts.no_append.clone().map(Flag::Text),
        ensure: opts.ensure.clone(),
    }
}

/// Run the ensure command.
///
/// # Errors
///
/// Returns an error if the options are invalid or the resource fails.
pub fn run(global: &GlobalOpts, opts: &EnsureOpts, log: &Logger) -> Result<()> {
    let entry = options(opts).validate()?;
    let manifest = Manifest::from_entries("command line", vec![entry]);
    let resources = super::build_resources(&manifest, log)?;

    log.stage("Ensuring line");
    super::run_to_completion(&resources, Mode::converge(global.dry_run), log)
}
