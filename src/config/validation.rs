//! Non-fatal checks for line declarations.
//!
//! Hard errors (bad flags, relative paths, invalid patterns) are raised while
//! loading. The checks here only flag options that have no effect in the
//! combination they are used in.
use super::file_lines::{Ensure, FileLineEntry};

/// A validation warning detected during manifest loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The manifest the declaration came from.
    pub source: String,
    /// Label of the declaration that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Validator for line declarations.
#[derive(Debug)]
pub struct FileLineValidator<'a> {
    source: &'a str,
    entries: &'a [FileLineEntry],
}

impl<'a> FileLineValidator<'a> {
    /// Create a validator over `entries` loaded from `source`.
    #[must_use]
    pub const fn new(source: &'a str, entries: &'a [FileLineEntry]) -> Self {
        Self { source, entries }
    }

    /// Return every warning found, in declaration order.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        for entry in self.entries {
            for message in entry_warnings(entry) {
                warnings.push(ValidationWarning::new(self.source, entry.label(), message));
            }
        }
        warnings
    }
}

fn entry_warnings(entry: &FileLineEntry) -> Vec<&'static str> {
    let mut messages = Vec::new();
    let has_match = entry.match_pattern.is_some();
    let has_after = entry.after.is_some();

    if entry.ensure == Ensure::Absent {
        if has_match || has_after || entry.unless.is_some() {
            messages.push("match, after and unless are ignored when ensure is absent");
        }
        return messages;
    }

    if has_match && has_after {
        if entry.unless.is_some() {
            messages.push("unless is ignored when both match and after are set");
        }
        if entry.no_append {
            messages.push("no_append is ignored when both match and after are set");
        }
    }
    if !has_match {
        if entry.unless.is_some() {
            messages.push("unless has no effect without match");
        }
        if entry.no_append {
            messages.push("no_append has no effect without match");
        }
    }
    if entry.multiple && !has_match && !has_after {
        messages.push("multiple has no effect without match or after");
    }
    messages
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry() -> FileLineEntry {
        FileLineEntry {
            name: Some("test".to_string()),
            path: PathBuf::from("/etc/test.conf"),
            line: "key = value".to_string(),
            match_pattern: None,
            after: None,
            unless: None,
            multiple: false,
            no_append: false,
            ensure: Ensure::Present,
        }
    }

    fn warnings_for(entry: FileLineEntry) -> Vec<ValidationWarning> {
        let entries = [entry];
        FileLineValidator::new("lines.toml", &entries).validate()
    }

    #[test]
    fn plain_entry_has_no_warnings() {
        assert!(warnings_for(entry()).is_empty());
    }

    #[test]
    fn match_with_unless_has_no_warnings() {
        let mut e = entry();
        e.match_pattern = Some("^key".to_string());
        e.unless = Some("value".to_string());
        e.no_append = true;
        assert!(warnings_for(e).is_empty());
    }

    #[test]
    fn unless_with_match_and_after_is_flagged() {
        let mut e = entry();
        e.match_pattern = Some("^key".to_string());
        e.after = Some("^# section".to_string());
        e.unless = Some("value".to_string());
        let warnings = warnings_for(e);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, "lines.toml");
        assert_eq!(warnings[0].item, "test");
        assert!(warnings[0].message.contains("unless is ignored"));
    }

    #[test]
    fn no_append_without_match_is_flagged() {
        let mut e = entry();
        e.no_append = true;
        let warnings = warnings_for(e);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no_append"));
    }

    #[test]
    fn multiple_without_patterns_is_flagged() {
        let mut e = entry();
        e.multiple = true;
        let warnings = warnings_for(e);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("multiple"));
    }

    #[test]
    fn patterns_on_absent_entry_are_flagged_once() {
        let mut e = entry();
        e.ensure = Ensure::Absent;
        e.match_pattern = Some("^key".to_string());
        e.after = Some("^x".to_string());
        let warnings = warnings_for(e);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("ensure is absent"));
    }
}
