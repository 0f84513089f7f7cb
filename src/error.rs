//! Domain-specific error types for line management.
//!
//! Internal modules return [`FileLineError`] while command handlers at the
//! CLI boundary convert it to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error kinds
//!
//! ```text
//! FileLineError
//! ├── InvalidConfiguration  malformed option, surfaced before any I/O
//! ├── InvalidPattern        match/after/unless is not a valid regex
//! ├── MultipleMatches       governing pattern hit more than one line
//! └── Io                    target file unreadable or unwritable
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating or applying a line declaration.
///
/// Every variant is fatal to the single operation that produced it; nothing
/// is retried internally.
#[derive(Error, Debug)]
pub enum FileLineError {
    /// An option carries a value outside its accepted domain.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfiguration {
        /// Name of the offending option (e.g. `"multiple"`).
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A `match`, `after` or `unless` option is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the declaration.
        pattern: String,
        /// Underlying compilation error.
        source: regex::Error,
    },

    /// The governing pattern matched several lines while `multiple` is off.
    #[error(
        "{count} lines in file '{}' match pattern '{pattern}'; one or no line must match unless multiple is set",
        path.display()
    )]
    MultipleMatches {
        /// File that was scanned.
        path: PathBuf,
        /// The governing pattern.
        pattern: String,
        /// How many lines matched it.
        count: usize,
    },

    /// Reading or writing the target file failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl FileLineError {
    /// Build an [`InvalidConfiguration`](Self::InvalidConfiguration) error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build an [`Io`](Self::Io) error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
