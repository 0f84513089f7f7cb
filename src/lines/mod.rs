//! Line resolution and file rewriting.
//!
//! The pipeline for one declaration is: [`loader`] reads the whole file,
//! [`placement`] computes the new line sequence (using [`matcher`] for
//! regular expressions), and [`writer`] overwrites the file. Nothing is
//! cached between calls; every operation reads the file fresh.
pub mod loader;
pub mod matcher;
pub mod placement;
pub mod writer;

use std::path::Path;

pub use loader::{FileContent, chomp};
pub use matcher::{MatchResult, Pattern};
pub use placement::{PlacementPolicy, Resolution, resolve};

use crate::error::FileLineError;

/// Return `true` if `path` contains a line equal to `line` (after chomping).
///
/// A missing or unreadable file counts as not containing the line.
#[must_use]
pub fn line_exists(path: &Path, line: &str) -> bool {
    match loader::load(path) {
        Ok(content) => content.contains_line(line),
        Err(e) => {
            tracing::debug!("treating unreadable file as absent: {e}");
            false
        }
    }
}

/// A computed rewrite of one file, not yet committed to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The file as it was read.
    pub content: FileContent,
    /// The lines the file should contain afterwards.
    pub lines: Vec<String>,
    changed: bool,
}

impl Edit {
    fn unchanged(content: FileContent) -> Self {
        let lines = content.lines.clone();
        Self {
            content,
            lines,
            changed: false,
        }
    }

    fn new(content: FileContent, lines: Vec<String>) -> Self {
        let changed = !content.is_unchanged_by(&lines);
        Self {
            content,
            lines,
            changed,
        }
    }

    /// Return `true` if committing would modify the file.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        self.changed
    }

    /// Write the new lines to disk, creating parent directories as needed.
    ///
    /// Does nothing when the edit is not a change. Returns whether the file
    /// was written.
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::Io`] if the file cannot be written.
    pub fn commit(&self) -> Result<bool, FileLineError> {
        if !self.changed {
            return Ok(false);
        }
        writer::ensure_parent_dir(&self.content.path)?;
        writer::write_lines(&self.content.path, &self.lines)?;
        Ok(true)
    }
}

/// Plan the rewrite that makes `line` present in `path`.
///
/// A file that already contains the line yields an edit that is not a
/// change, so the file is never rewritten.
///
/// # Errors
///
/// Returns [`FileLineError::Io`] if the file cannot be read, or
/// [`FileLineError::MultipleMatches`] if the policy's governing pattern
/// matches too many lines.
pub fn plan_present(
    path: &Path,
    line: &str,
    policy: &PlacementPolicy,
) -> Result<Edit, FileLineError> {
    let content = loader::load(path)?;
    if content.contains_line(line) {
        tracing::debug!(path = %path.display(), "line already present");
        return Ok(Edit::unchanged(content));
    }
    let resolution = resolve(&content, line, policy)?;
    Ok(Edit::new(content, resolution.lines))
}

/// Plan the rewrite that removes every occurrence of `line` from `path`.
///
/// A missing file, or one without the line, yields an edit that is not a
/// change.
///
/// # Errors
///
/// Returns [`FileLineError::Io`] if the file exists but cannot be read.
pub fn plan_absent(path: &Path, line: &str) -> Result<Edit, FileLineError> {
    let content = loader::load(path)?;
    let removed = content.count_line(line);
    if removed == 0 {
        return Ok(Edit::unchanged(content));
    }
    tracing::debug!(path = %path.display(), removed, "removing line");
    let wanted = chomp(line);
    let lines = content
        .lines
        .iter()
        .filter(|l| chomp(l) != wanted)
        .cloned()
        .collect();
    Ok(Edit::new(content, lines))
}
