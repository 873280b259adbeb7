// ircview - Styled IRC scrollback for the terminal
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A link-detection rule. Lower `priority` wins when matches overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPattern {
    pub pattern: String,
    pub priority: i32,
}

impl UrlPattern {
    pub fn new(pattern: impl Into<String>, priority: i32) -> Self {
        Self { pattern: pattern.into(), priority }
    }

    /// Compile the pattern case-insensitively.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern).case_insensitive(true).build()
    }
}

/// The built-in rules, most specific first.
#[must_use]
pub fn default_patterns() -> Vec<UrlPattern> {
    vec![
        UrlPattern::new(r#"https?://[^\s<>"]+[^\s<>".,:;!?]"#, 1),
        UrlPattern::new(r#"ftp://[^\s<>"]+[^\s<>".,:;!?]"#, 2),
        UrlPattern::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}", 3),
        UrlPattern::new(r"#[a-zA-Z0-9_-]+", 4),
        UrlPattern::new(r#"file://[^\s<>"]+"#, 5),
        UrlPattern::new(r#"[a-zA-Z][a-zA-Z0-9+.-]*://[^\s<>"]+[^\s<>".,:;!?]"#, 6),
    ]
}

/// A link found in a piece of text. `start..end` are character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Index of the pattern in the list the matcher was built from.
    pub pattern_id: usize,
    pub priority: i32,
}

impl UrlMatch {
    /// Whether the two spans share at least one character.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

struct CompiledPattern {
    id: usize,
    priority: i32,
    regex: Regex,
}

/// Runs every configured pattern and resolves overlaps by priority.
pub struct UrlMatcher {
    patterns: Vec<CompiledPattern>,
}

impl UrlMatcher {
    /// Compile `patterns`. A pattern that fails to compile is logged and
    /// skipped; the rest stay active.
    #[must_use]
    pub fn new(patterns: &[UrlPattern]) -> Self {
        let patterns = patterns
            .iter()
            .enumerate()
            .filter_map(|(id, p)| match p.compile() {
                Ok(regex) => Some(CompiledPattern { id, priority: p.priority, regex }),
                Err(err) => {
                    tracing::warn!(pattern = %p.pattern, "disabling URL pattern: {err}");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Number of patterns that compiled.
    #[must_use]
    pub fn active_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// All link spans in `text`, non-overlapping and sorted by start.
    #[must_use]
    pub fn find(&self, text: &str) -> Vec<UrlMatch> {
        let mut accepted: Vec<UrlMatch> = Vec::new();
        if text.is_empty() {
            return accepted;
        }

        for pattern in &self.patterns {
            for found in pattern.regex.find_iter(text) {
                let start = text[..found.start()].chars().count();
                let candidate = UrlMatch {
                    text: found.as_str().to_owned(),
                    start,
                    end: start + found.as_str().chars().count(),
                    pattern_id: pattern.id,
                    priority: pattern.priority,
                };
                merge_candidate(&mut accepted, candidate);
            }
        }

        accepted.sort_by_key(|m| m.start);
        accepted
    }

    /// The link covering character `offset` of `text`, if any.
    #[must_use]
    pub fn url_at(&self, text: &str, offset: usize) -> Option<UrlMatch> {
        self.find(text).into_iter().find(|m| m.contains(offset))
    }
}

impl Default for UrlMatcher {
    fn default() -> Self {
        Self::new(&default_patterns())
    }
}

/// Keep `candidate` only if it beats every accepted match it overlaps.
fn merge_candidate(accepted: &mut Vec<UrlMatch>, candidate: UrlMatch) {
    let blocked =
        accepted.iter().any(|m| m.overlaps(&candidate) && m.priority <= candidate.priority);
    if blocked {
        return;
    }
    accepted.retain(|m| !m.overlaps(&candidate));
    accepted.push(candidate);
}
