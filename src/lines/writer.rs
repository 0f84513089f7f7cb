//! Serialization of a line sequence back to disk.
//!
//! Files are overwritten in place rather than through a temporary file and
//! rename, which is acceptable for small config files only.
use std::path::Path;

use crate::error::FileLineError;

/// Join `lines`, terminating each one with exactly one `\n`.
#[must_use]
pub fn render(lines: &[String]) -> String {
    let capacity = lines.iter().map(|l| l.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`FileLineError::Io`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), FileLineError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FileLineError::io(parent, e))?;
    }
    Ok(())
}

/// Overwrite `path` with `lines`.
///
/// # Errors
///
/// Returns [`FileLineError::Io`] if the file cannot be written.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<(), FileLineError> {
    std::fs::write(path, render(lines)).map_err(|e| FileLineError::io(path, e))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn render_terminates_every_line() {
        assert_eq!(render(&owned(&["a", "b"])), "a\nb\n");
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn render_keeps_blank_lines() {
        assert_eq!(render(&owned(&["", "x", ""])), "\nx\n\n");
    }

    #[test]
    fn write_lines_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf");
        std::fs::write(&path, "old contents that are longer\n").unwrap();

        write_lines(&path, &owned(&["new"])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn write_lines_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("conf");
        let err = write_lines(&path, &owned(&["x"])).unwrap_err();
        assert!(matches!(err, FileLineError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.conf");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn ensure_parent_dir_noop_when_parent_exists() {
        let dir = tempfile::tempdir().unwrap();
        ensure_parent_dir(&dir.path().join("file.conf")).unwrap();
        assert!(dir.path().is_dir());
    }
}
