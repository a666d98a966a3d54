//! Tag normalization
//!
//! Turns a free-text multi-value field such as `"['Python', 'SQL', ' sql ']"`
//! into an ordered, de-duplicated list of tags. Absent, empty or unparseable
//! input yields no tags; it is never an error.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized, non-empty token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Wrap an already-normalized string. Callers producing raw text should go
    /// through `TagNormalizer` instead.
    pub fn new(tag: impl Into<String>) -> Self {
        Tag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag(s.to_string())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag(s)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splitting and cleaning rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Characters that separate items
    pub delimiters: Vec<char>,
    /// Characters stripped from both ends of every item (list brackets, quotes)
    pub strip_chars: Vec<char>,
    /// Lowercase every item
    pub lowercase: bool,
    /// Replace inner whitespace runs with a single space
    pub collapse_whitespace: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            delimiters: vec![',', ';', '\n'],
            strip_chars: vec!['[', ']', '\'', '"'],
            lowercase: true,
            collapse_whitespace: true,
        }
    }
}

/// Splits raw fields into tags according to a `TagConfig`
#[derive(Debug, Clone, Default)]
pub struct TagNormalizer {
    config: TagConfig,
}

impl TagNormalizer {
    pub fn new(config: TagConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Normalize one raw field into tags, in first-occurrence order
    pub fn normalize(&self, raw: Option<&str>) -> Vec<Tag> {
        let raw = match raw {
            Some(r) if !r.trim().is_empty() => r,
            _ => return Vec::new(),
        };

        let mut seen: IndexSet<String> = IndexSet::new();
        for item in raw.split(|c: char| self.config.delimiters.contains(&c)) {
            if let Some(token) = self.clean(item) {
                seen.insert(token);
            }
        }
        seen.into_iter().map(Tag).collect()
    }

    fn clean(&self, item: &str) -> Option<String> {
        let strip = &self.config.strip_chars;
        let trimmed = item.trim_matches(|c: char| c.is_whitespace() || strip.contains(&c));

        let mut token = if self.config.collapse_whitespace {
            trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            trimmed.to_string()
        };
        if self.config.lowercase {
            token = token.to_lowercase();
        }

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}
