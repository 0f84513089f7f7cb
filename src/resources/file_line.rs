//! Line-in-file resource: `exists?`, `create` and `destroy` over [`crate::lines`].
use anyhow::Result;
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};
use crate::config::file_lines::{Ensure, FileLineEntry};
use crate::error::FileLineError;
use crate::lines::{self, Edit, Pattern, PlacementPolicy};

/// A single line in a text file that can be checked and applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLineResource {
    /// Optional label used in place of the generated description.
    pub name: Option<String>,
    /// Target file.
    pub path: PathBuf,
    /// Desired line (may contain `\N` backreferences for match policies).
    pub line: String,
    /// Whether the line should be present or absent.
    pub ensure: Ensure,
    /// Placement used when the line has to be added.
    pub policy: PlacementPolicy,
}

impl FileLineResource {
    /// Create a resource that ensures `line` is present in `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line: impl Into<String>, policy: PlacementPolicy) -> Self {
        Self {
            name: None,
            path: path.into(),
            line: line.into(),
            ensure: Ensure::Present,
            policy,
        }
    }

    /// Create a resource that removes every occurrence of `line` from `path`.
    #[must_use]
    pub fn absent(path: impl Into<PathBuf>, line: impl Into<String>) -> Self {
        Self {
            ensure: Ensure::Absent,
            ..Self::new(path, line, PlacementPolicy::Append)
        }
    }

    /// Create from a validated declaration, compiling its patterns.
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::InvalidPattern`] if `match`, `after` or
    /// `unless` is not a valid regular expression.
    pub fn from_entry(entry: &FileLineEntry) -> Result<Self, FileLineError> {
        let policy = select_policy(
            entry.match_pattern.as_deref(),
            entry.after.as_deref(),
            entry.unless.as_deref(),
            entry.multiple,
            entry.no_append,
        )?;
        Ok(Self {
            name: entry.name.clone(),
            path: entry.path.clone(),
            line: entry.line.clone(),
            ensure: entry.ensure,
            policy,
        })
    }

    /// Return `true` if the file already contains the line.
    ///
    /// A missing or unreadable file counts as not containing it.
    #[must_use]
    pub fn exists(&self) -> bool {
        lines::line_exists(&self.path, &self.line)
    }

    /// Compute the edit that would bring the file into the declared state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the placement fails.
    pub fn plan(&self) -> Result<Edit> {
        let edit = match self.ensure {
            Ensure::Present => lines::plan_present(&self.path, &self.line, &self.policy)?,
            Ensure::Absent => lines::plan_absent(&self.path, &self.line)?,
        };
        Ok(edit)
    }

    /// Make the line present, placing it according to the policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or if the
    /// governing pattern matches more lines than allowed. The file is left
    /// untouched on error.
    pub fn create(&self) -> Result<ResourceChange> {
        let edit = lines::plan_present(&self.path, &self.line, &self.policy)?;
        Ok(commit(&edit)?)
    }

    /// Remove every occurrence of the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or written.
    pub fn destroy(&self) -> Result<ResourceChange> {
        let edit = lines::plan_absent(&self.path, &self.line)?;
        Ok(commit(&edit)?)
    }
}

fn commit(edit: &Edit) -> Result<ResourceChange, FileLineError> {
    Ok(if edit.commit()? {
        ResourceChange::Applied
    } else {
        ResourceChange::AlreadyCorrect
    })
}

/// Choose the placement policy for a combination of options.
///
/// `match` takes precedence: alone it replaces matching lines, together with
/// `after` it falls back to inserting after the anchor. `after` alone
/// inserts after every anchor. Without either the line is appended.
///
/// # Errors
///
/// Returns [`FileLineError::InvalidPattern`] if any pattern fails to compile.
pub fn select_policy(
    match_pattern: Option<&str>,
    after: Option<&str>,
    unless: Option<&str>,
    multiple: bool,
    no_append: bool,
) -> Result<PlacementPolicy, FileLineError> {
    let pattern = match_pattern.map(Pattern::new).transpose()?;
    let after = after.map(Pattern::new).transpose()?;
    let unless = unless.map(Pattern::new).transpose()?;

    Ok(match (pattern, after) {
        (Some(pattern), Some(after)) => PlacementPolicy::MatchReplaceWithAfterFallback {
            pattern,
            after,
            allow_multiple: multiple,
        },
        (Some(pattern), None) => PlacementPolicy::MatchReplace {
            pattern,
            unless,
            allow_multiple: multiple,
            append_if_no_match: !no_append,
        },
        (None, Some(after)) => PlacementPolicy::After {
            after,
            allow_multiple: multiple,
        },
        (None, None) => PlacementPolicy::Append,
    })
}

impl Resource for FileLineResource {
    fn description(&self) -> String {
        self.name.clone().unwrap_or_else(|| match self.ensure {
            Ensure::Present => format!("{}: {}", self.path.display(), self.line),
            Ensure::Absent => format!("{}: -{}", self.path.display(), self.line),
        })
    }

    fn current_state(&self) -> Result<ResourceState> {
        match self.ensure {
            Ensure::Present => Ok(if self.exists() {
                ResourceState::Correct
            } else {
                ResourceState::Missing
            }),
            Ensure::Absent => {
                let content = lines::loader::load(&self.path)?;
                let count = content.count_line(&self.line);
                Ok(if count == 0 {
                    ResourceState::Correct
                } else {
                    ResourceState::Incorrect {
                        current: format!("{count} occurrence(s)"),
                    }
                })
            }
        }
    }

    fn would_change(&self) -> Result<bool> {
        Ok(self.plan()?.is_change())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.ensure {
            Ensure::Present => self.create(),
            Ensure::Absent => self.destroy(),
        }
    }
}
