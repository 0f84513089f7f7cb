// Shared helpers for integration tests.
//
// Provides a temporary directory holding target files and a manifest so each
// integration test can set up an isolated environment without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use file_line::logging::Logger;

/// An isolated working directory backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory containing target files and manifests.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new, empty context.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        Self { root }
    }

    /// Absolute path of `name` inside the context.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write a target file and return its absolute path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write target file");
        path
    }

    /// Write `lines.toml` with the given body and return its path.
    pub fn write_manifest(&self, body: &str) -> PathBuf {
        self.write_file("lines.toml", body)
    }

    /// Read a file inside the context.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("read file")
    }
}

/// A logger that writes nowhere except the (absent) global subscriber.
pub fn quiet_logger() -> Logger {
    Logger::with_log_file(None)
}

/// Render one `[[line]]` table using TOML literal strings.
pub fn line_table(path: &Path, line: &str, extra: &str) -> String {
    format!(
        "[[line]]\npath = '{}'\nline = '{line}'\n{extra}\n",
        path.display()
    )
}
