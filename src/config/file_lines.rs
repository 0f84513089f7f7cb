//! Line declaration options and their validation.
//!
//! Options arrive as loosely typed values (strings from the CLI, strings or
//! booleans from TOML). [`FileLineOptions::validate`] coerces them into a
//! [`FileLineEntry`] whose flags are real booleans, so the line engine never
//! sees raw strings.
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::FileLineError;

/// Whether the line should be present in or absent from the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ensure {
    /// Make sure the line is in the file.
    #[default]
    Present,
    /// Remove every occurrence of the line.
    Absent,
}

impl Ensure {
    /// Parse an `ensure` value.
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::InvalidConfiguration`] for anything other
    /// than `present` or `absent`.
    pub fn parse(value: &str) -> Result<Self, FileLineError> {
        match value {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(FileLineError::invalid_config(
                "ensure",
                format!("Invalid value \"{other}\". Valid values are present, absent."),
            )),
        }
    }

    /// The value as written in a declaration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

/// A boolean option written either as a TOML boolean or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    /// `multiple = true`
    Bool(bool),
    /// `multiple = "true"`
    Text(String),
}

impl Flag {
    /// Coerce the flag to a boolean; only `true` and `false` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::InvalidConfiguration`] naming `field` when
    /// the text is neither `"true"` nor `"false"`.
    pub fn to_bool(&self, field: &str) -> Result<bool, FileLineError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Text(t) if t == "true" => Ok(true),
            Self::Text(t) if t == "false" => Ok(false),
            Self::Text(t) => Err(FileLineError::invalid_config(
                field,
                format!("Invalid value \"{t}\". Valid values are true, false."),
            )),
        }
    }
}

/// One line declaration as written by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLineOptions {
    /// Optional label used in logs.
    #[serde(default)]
    pub name: Option<String>,
    /// Absolute path of the target file.
    pub path: String,
    /// Desired line; may contain `\N` backreferences when `match` is set.
    pub line: String,
    /// Pattern selecting lines to replace.
    #[serde(default, rename = "match")]
    pub match_pattern: Option<String>,
    /// Pattern selecting the anchor line to insert after.
    #[serde(default)]
    pub after: Option<String>,
    /// Guard pattern; matching lines are not replaced.
    #[serde(default)]
    pub unless: Option<String>,
    /// Allow the governing pattern to match several lines.
    #[serde(default)]
    pub multiple: Option<Flag>,
    /// Do not append when `match` finds nothing.
    #[serde(default)]
    pub no_append: Option<Flag>,
    /// `present` (default) or `absent`.
    #[serde(default)]
    pub ensure: Option<String>,
}

/// A validated line declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLineEntry {
    /// Optional label used in logs.
    pub name: Option<String>,
    /// Absolute path of the target file.
    pub path: PathBuf,
    /// Desired line.
    pub line: String,
    /// Pattern selecting lines to replace.
    pub match_pattern: Option<String>,
    /// Pattern selecting the anchor line to insert after.
    pub after: Option<String>,
    /// Guard pattern; matching lines are not replaced.
    pub unless: Option<String>,
    /// Allow the governing pattern to match several lines.
    pub multiple: bool,
    /// Do not append when `match` finds nothing.
    pub no_append: bool,
    /// Desired state of the line.
    pub ensure: Ensure,
}

impl FileLineEntry {
    /// Label for logs: the name if given, otherwise `path: line`.
    #[must_use]
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}: {}", self.path.display(), self.line))
    }
}

impl FileLineOptions {
    /// Validate and coerce the options into a [`FileLineEntry`].
    ///
    /// Patterns are not compiled here; see
    /// [`FileLineResource::from_entry`](crate::resources::file_line::FileLineResource::from_entry).
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::InvalidConfiguration`] for a relative path,
    /// a multi-line `line`, a malformed boolean, or an unknown `ensure`.
    pub fn validate(self) -> Result<FileLineEntry, FileLineError> {
        let path = PathBuf::from(&self.path);
        if !path.is_absolute() {
            return Err(FileLineError::invalid_config(
                "path",
                format!("File paths must be fully qualified, not '{}'", self.path),
            ));
        }
        if self.line.trim_end_matches('\n').contains('\n') {
            return Err(FileLineError::invalid_config(
                "line",
                "must be a single line of text",
            ));
        }
        let multiple = flag(self.multiple.as_ref(), "multiple")?;
        let no_append = flag(self.no_append.as_ref(), "no_append")?;
        let ensure = self
            .ensure
            .as_deref()
            .map_or(Ok(Ensure::Present), Ensure::parse)?;

        Ok(FileLineEntry {
            name: self.name,
            path,
            line: self.line,
            match_pattern: self.match_pattern,
            after: self.after,
            unless: self.unless,
            multiple,
            no_append,
            ensure,
        })
    }
}

fn flag(value: Option<&Flag>, field: &str) -> Result<bool, FileLineError> {
    value.map_or(Ok(false), |f| f.to_bool(field))
}
