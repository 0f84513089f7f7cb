//! Whole-file loading into an ordered line sequence.
//!
//! Files are read into memory in one piece. This is only suitable for
//! config-sized files; there is no streaming variant.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::FileLineError;

/// A text file held in memory as an ordered sequence of lines.
///
/// Each line is stored without its trailing `\n`. A `\r` left over from a
/// CRLF terminator stays part of the line so untouched lines are written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Path the content was loaded from.
    pub path: PathBuf,
    /// Lines in file order.
    pub lines: Vec<String>,
    /// Whether the file existed when it was loaded.
    pub existed: bool,
}

impl FileContent {
    /// Split `text` into lines as if it had been read from `path`.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.split_terminator('\n').map(String::from).collect(),
            existed: true,
        }
    }

    /// Content standing in for a file that does not exist yet.
    #[must_use]
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
            existed: false,
        }
    }

    /// Return `true` if any line, chomped, equals `line` chomped.
    #[must_use]
    pub fn contains_line(&self, line: &str) -> bool {
        let wanted = chomp(line);
        self.lines.iter().any(|l| chomp(l) == wanted)
    }

    /// Count the lines that are equal to `line` after chomping.
    #[must_use]
    pub fn count_line(&self, line: &str) -> usize {
        let wanted = chomp(line);
        self.lines.iter().filter(|l| chomp(l) == wanted).count()
    }

    /// Return `true` if `lines` is the sequence already held.
    ///
    /// Terminator differences (a missing final newline) do not count, so a
    /// placement with no effect never rewrites the file.
    #[must_use]
    pub fn is_unchanged_by(&self, lines: &[String]) -> bool {
        self.lines.as_slice() == lines
    }
}

/// Strip one trailing line terminator (`\r\n`, `\n` or `\r`).
#[must_use]
pub fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Read `path` into memory.
///
/// A file that does not exist loads as empty [`FileContent::missing`]
/// content so that callers can create it.
///
/// # Errors
///
/// Returns [`FileLineError::Io`] if the file exists but cannot be read or
/// is not valid UTF-8 text.
pub fn load(path: &Path) -> Result<FileContent, FileLineError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(FileContent::from_text(path, &text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(FileContent::missing(path)),
        Err(e) => Err(FileLineError::io(path, e)),
    }
}
