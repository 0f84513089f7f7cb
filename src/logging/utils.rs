//! Log file location, ANSI stripping and timestamps.
use std::env;
use std::fs;
use std::path::PathBuf;

/// Remove CSI escape sequences (colors, cursor movement) from `s`.
///
/// A sequence runs from `ESC [` up to and including its final byte in the
/// `@`..=`~` range.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((before, after)) = rest.split_once("\x1b[") {
        out.push_str(before);
        let end = after
            .find(|c: char| ('@'..='~').contains(&c))
            .map_or(after.len(), |i| i + 1);
        rest = after.get(end..).unwrap_or_default();
    }
    out.push_str(rest);
    out
}

/// Directory holding per-command log files, created on demand.
///
/// Resolves to `$XDG_CACHE_HOME/file-line`, falling back to
/// `$HOME/.cache/file-line` (or `%USERPROFILE%` on Windows).
fn log_dir() -> Option<PathBuf> {
    let base = env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .or_else(|| env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;
    let dir = base.join("file-line");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Log file for `command`, e.g. `~/.cache/file-line/apply.log`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(format!("{command}.log")))
}

fn utc_now(pattern: &str) -> String {
    chrono::Utc::now().format(pattern).to_string()
}

/// Current UTC date and time, `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    utc_now("%Y-%m-%d %H:%M:%S")
}

/// Current UTC time of day, `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    utc_now("%H:%M:%S")
}
