//! Regular-expression matching and backreference expansion.
use regex::Regex;

use crate::error::FileLineError;

/// A compiled regular expression that remembers its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl Pattern {
    /// Compile `source` into a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`FileLineError::InvalidPattern`] if `source` is not a valid
    /// regular expression.
    pub fn new(source: &str) -> Result<Self, FileLineError> {
        let regex = Regex::new(source).map_err(|e| FileLineError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Return `true` if the pattern matches anywhere in `line`.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Count the lines the pattern matches.
    #[must_use]
    pub fn count_matches(&self, lines: &[String]) -> usize {
        lines.iter().filter(|l| self.is_match(l)).count()
    }

    /// Match against `line`, capturing the first match's groups.
    #[must_use]
    pub fn evaluate(&self, line: &str) -> MatchResult {
        self.regex
            .captures(line)
            .map_or_else(MatchResult::default, |caps| MatchResult {
                matched: true,
                text: caps.get(0).map_or_else(String::new, |m| m.as_str().to_string()),
                groups: caps
                    .iter()
                    .skip(1)
                    .map(|g| g.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect(),
            })
    }
}

/// Outcome of evaluating a [`Pattern`] against one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the pattern matched.
    pub matched: bool,
    /// Text of the whole match (empty when unmatched).
    pub text: String,
    /// Captured groups `1..n` in order; a group that did not participate is empty.
    pub groups: Vec<String>,
}

impl MatchResult {
    /// Text of group `index`, where `0` is the whole match.
    ///
    /// Out-of-range groups are empty.
    #[must_use]
    pub fn group(&self, index: usize) -> &str {
        if index == 0 {
            return &self.text;
        }
        self.groups.get(index - 1).map_or("", String::as_str)
    }

    /// Expand `\0`..`\9` placeholders in `template` with this match's groups.
    ///
    /// `\\` produces a single backslash. Any other escape is kept as written.
    #[must_use]
    pub fn expand(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    chars.next();
                    let index = d.to_digit(10).map_or(0, |n| n as usize);
                    out.push_str(self.group(index));
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            }
        }
        out
    }
}
