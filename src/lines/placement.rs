//! Placement of a desired line within a file's lines.
//!
//! [`resolve`] computes the complete new line sequence for a file from its
//! current content and a [`PlacementPolicy`]. It never touches the disk; a
//! multiple-match failure is reported before anything could be written.
use super::loader::{FileContent, chomp};
use super::matcher::Pattern;
use crate::error::FileLineError;

/// How the desired line is placed when it is not already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Append the line at the end of the file.
    Append,
    /// Replace every line matching `pattern`.
    MatchReplace {
        /// Lines to replace; captures feed `\N` placeholders in the line.
        pattern: Pattern,
        /// Matching lines that also match this guard are left alone.
        unless: Option<Pattern>,
        /// Allow `pattern` to match more than one line.
        allow_multiple: bool,
        /// Append the line when `pattern` matches nothing.
        append_if_no_match: bool,
    },
    /// Replace lines matching `pattern`, or insert after the first `after`
    /// anchor when nothing matches.
    MatchReplaceWithAfterFallback {
        /// Lines to replace.
        pattern: Pattern,
        /// Anchor used when `pattern` matches nothing.
        after: Pattern,
        /// Allow `pattern` to match more than one line.
        allow_multiple: bool,
    },
    /// Insert the line after each line matching `after`.
    After {
        /// Anchor lines.
        after: Pattern,
        /// Allow `after` to match more than one line.
        allow_multiple: bool,
    },
}

impl PlacementPolicy {
    /// Short name used in log messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::MatchReplace { .. } => "match",
            Self::MatchReplaceWithAfterFallback { .. } => "match with after fallback",
            Self::After { .. } => "after",
        }
    }
}

/// The new line sequence produced by [`resolve`], with counts of what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Complete new file lines.
    pub lines: Vec<String>,
    /// Lines replaced in place.
    pub replaced: usize,
    /// Lines inserted after an anchor.
    pub inserted: usize,
    /// Whether the line was appended at the end.
    pub appended: bool,
}

impl Resolution {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
        self.appended = true;
    }
}

/// Compute the new lines of `content` with `line` placed according to `policy`.
///
/// # Errors
///
/// Returns [`FileLineError::MultipleMatches`] when the governing pattern
/// matches more than one line and the policy does not allow it.
pub fn resolve(
    content: &FileContent,
    line: &str,
    policy: &PlacementPolicy,
) -> Result<Resolution, FileLineError> {
    let line = chomp(line);
    let resolution = match policy {
        PlacementPolicy::Append => append(content, line),
        PlacementPolicy::MatchReplace {
            pattern,
            unless,
            allow_multiple,
            append_if_no_match,
        } => {
            let count = checked_count(content, pattern, *allow_multiple)?;
            match_replace(content, line, pattern, unless.as_ref(), count, *append_if_no_match)
        }
        PlacementPolicy::MatchReplaceWithAfterFallback {
            pattern,
            after,
            allow_multiple,
        } => {
            let count = checked_count(content, pattern, *allow_multiple)?;
            match_replace_with_after(content, line, pattern, after, count)
        }
        PlacementPolicy::After {
            after,
            allow_multiple,
        } => {
            let count = checked_count(content, after, *allow_multiple)?;
            insert_after(content, line, after, count)
        }
    };
    tracing::debug!(
        path = %content.path.display(),
        policy = policy.kind(),
        replaced = resolution.replaced,
        inserted = resolution.inserted,
        appended = resolution.appended,
        "resolved line placement"
    );
    Ok(resolution)
}

/// Count lines matching `pattern`, failing on more than one unless allowed.
fn checked_count(
    content: &FileContent,
    pattern: &Pattern,
    allow_multiple: bool,
) -> Result<usize, FileLineError> {
    let count = pattern.count_matches(&content.lines);
    if count > 1 && !allow_multiple {
        return Err(FileLineError::MultipleMatches {
            path: content.path.clone(),
            pattern: pattern.as_str().to_string(),
            count,
        });
    }
    Ok(count)
}

fn append(content: &FileContent, line: &str) -> Resolution {
    let mut resolution = Resolution {
        lines: content.lines.clone(),
        ..Resolution::default()
    };
    if !content.contains_line(line) {
        resolution.append(line);
    }
    resolution
}

/// Emit `source`, or `line` expanded from its captures if `pattern` matches it.
fn substitute(out: &mut Resolution, source: &str, line: &str, pattern: &Pattern) {
    let result = pattern.evaluate(source);
    if result.matched {
        out.lines.push(result.expand(line));
        out.replaced += 1;
    } else {
        out.lines.push(source.to_string());
    }
}

fn match_replace(
    content: &FileContent,
    line: &str,
    pattern: &Pattern,
    unless: Option<&Pattern>,
    count: usize,
    append_if_no_match: bool,
) -> Resolution {
    let mut out = Resolution::default();
    for source in &content.lines {
        if unless.is_some_and(|guard| pattern.is_match(source) && guard.is_match(source)) {
            out.lines.push(source.clone());
        } else {
            substitute(&mut out, source, line, pattern);
        }
    }
    if count == 0 && append_if_no_match {
        out.append(line);
    }
    out
}

fn match_replace_with_after(
    content: &FileContent,
    line: &str,
    pattern: &Pattern,
    after: &Pattern,
    count: usize,
) -> Resolution {
    let mut out = Resolution::default();
    let mut effective = count;
    for source in &content.lines {
        substitute(&mut out, source, line, pattern);
        if effective == 0 && after.is_match(source) {
            out.lines.push(line.to_string());
            out.inserted += 1;
            effective += 1;
        }
    }
    if effective == 0 {
        out.append(line);
    }
    out
}

fn insert_after(content: &FileContent, line: &str, after: &Pattern, count: usize) -> Resolution {
    let mut out = Resolution::default();
    for source in &content.lines {
        out.lines.push(source.clone());
        if after.is_match(source) {
            out.lines.push(line.to_string());
            out.inserted += 1;
        }
    }
    if count == 0 {
        out.append(line);
    }
    out
}
