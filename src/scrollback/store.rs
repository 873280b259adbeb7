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

use super::tags::{Tag, TagSpan};
use std::collections::VecDeque;

/// One logical line of scrollback: its text and the tags painted over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    text: String,
    spans: Vec<TagSpan>,
    chars: usize,
}

impl StyledLine {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tag spans in the order they were applied.
    #[must_use]
    pub fn spans(&self) -> &[TagSpan] {
        &self.spans
    }

    /// Tags covering character `offset`, in application order.
    pub fn tags_at(&self, offset: usize) -> impl Iterator<Item = &Tag> {
        self.spans.iter().filter(move |s| s.contains(offset)).map(|s| &s.tag)
    }

    /// Insert `text` at the end and return its character range.
    pub(crate) fn push_str(&mut self, text: &str) -> (usize, usize) {
        let start = self.chars;
        self.text.push_str(text);
        self.chars += text.chars().count();
        (start, self.chars)
    }

    /// Tag characters `start..end`. Empty or out-of-range spans are ignored.
    pub(crate) fn apply_tag(&mut self, tag: Tag, start: usize, end: usize) {
        let end = end.min(self.chars);
        if start >= end {
            return;
        }
        self.spans.push(TagSpan { start, end, tag });
    }
}

/// Append-only line storage with batched trimming at the front.
///
/// Every line gets a sequence number when appended; trimming the front
/// advances the first retained number, so a sequence number keeps naming
/// the same line until that line is evicted.
#[derive(Debug, Default)]
pub struct ContentStore {
    lines: VecDeque<StyledLine>,
    first_seq: u64,
}

impl ContentStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&StyledLine> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &StyledLine> {
        self.lines.iter()
    }

    /// Sequence number of the oldest retained line.
    #[must_use]
    pub fn first_seq(&self) -> u64 {
        self.first_seq
    }

    /// Index of the line with sequence number `seq`, if still retained.
    #[must_use]
    pub fn index_of_seq(&self, seq: u64) -> Option<usize> {
        let index = usize::try_from(seq.checked_sub(self.first_seq)?).ok()?;
        (index < self.lines.len()).then_some(index)
    }

    pub(crate) fn push(&mut self, line: StyledLine) {
        self.lines.push_back(line);
    }

    /// Drop the `count` oldest lines in one operation.
    pub(crate) fn trim_front(&mut self, count: usize) -> usize {
        let count = count.min(self.lines.len());
        self.lines.drain(..count);
        self.first_seq += count as u64;
        count
    }

    /// Drop the `count` newest lines.
    pub(crate) fn truncate_back(&mut self, count: usize) -> usize {
        let count = count.min(self.lines.len());
        self.lines.truncate(self.lines.len() - count);
        count
    }

    pub(crate) fn clear(&mut self) {
        self.first_seq += self.lines.len() as u64;
        self.lines.clear();
    }
}
