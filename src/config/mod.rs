//! Manifest loading: TOML declarations into validated line entries.
pub mod file_lines;
pub mod toml_loader;
pub mod validation;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use file_lines::{FileLineEntry, FileLineOptions};
use validation::{FileLineValidator, ValidationWarning};

/// On-disk layout of a manifest: an array of `[[line]]` tables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    line: Vec<FileLineOptions>,
}

/// All validated line declarations from one manifest, in declaration order.
#[derive(Debug)]
pub struct Manifest {
    /// Where the declarations were loaded from.
    pub path: PathBuf,
    /// Validated declarations.
    pub entries: Vec<FileLineEntry>,
}

impl Manifest {
    /// Load and validate every declaration in the manifest at `path`.
    ///
    /// A missing manifest yields no declarations.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or any declaration is
    /// invalid; no declaration is returned in that case.
    pub fn load(path: &Path) -> Result<Self> {
        let file: ManifestFile = toml_loader::load_config(path)?;
        let entries = file
            .line
            .into_iter()
            .enumerate()
            .map(|(index, options)| {
                options
                    .validate()
                    .with_context(|| format!("declaration #{} in {}", index + 1, path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Build a manifest from already validated entries.
    #[must_use]
    pub fn from_entries(path: impl Into<PathBuf>, entries: Vec<FileLineEntry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    /// Run the non-fatal checks over every declaration.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let source = self
            .path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        FileLineValidator::new(&source, &self.entries).validate()
    }
}
