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

use super::store::{ContentStore, StyledLine};
use super::tags::TagTable;
use super::writer::{StampFormatter, WriteContext, compose_indent, compose_line};
use crate::format::FormattedMessage;
use crate::scroll::{ScrollMarker, ScrollState};
use crate::url::UrlMatcher;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Identity of a buffer within one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub(crate) u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Scrollback of one chat context.
///
/// `num_lines` counts logical lines and always equals the number of lines in
/// the store. With `max_lines > 0` it never exceeds `max_lines` once an
/// append has returned.
#[derive(Debug)]
pub struct Buffer {
    id: BufferId,
    owner: String,
    max_lines: usize,
    num_lines: usize,
    store: ContentStore,
    tags: Rc<TagTable>,
    scroll: ScrollState,
    created_at: Instant,
    time_stamp: bool,
    scroll_position: f64,
    marker: Option<ScrollMarker>,
}

impl Buffer {
    pub(crate) fn new(
        id: BufferId,
        owner: String,
        max_lines: usize,
        time_stamp: bool,
        tags: Rc<TagTable>,
        now: Instant,
    ) -> Self {
        Self {
            id,
            owner,
            max_lines,
            num_lines: 0,
            store: ContentStore::default(),
            tags,
            scroll: ScrollState::LoadingBacklog,
            created_at: now,
            time_stamp,
            scroll_position: 1.0,
            marker: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Label of the chat context that opened this buffer.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    #[must_use]
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    #[must_use]
    pub fn tag_table(&self) -> &TagTable {
        &self.tags
    }

    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Whether appends should keep the viewport pinned to the bottom.
    #[must_use]
    pub fn auto_scroll(&self) -> bool {
        self.scroll != ScrollState::Scrolled
    }

    #[must_use]
    pub fn loading_backlog(&self) -> bool {
        self.scroll == ScrollState::LoadingBacklog
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn time_stamp(&self) -> bool {
        self.time_stamp
    }

    /// Fraction saved when the buffer was last detached, 0 top, 1 bottom.
    #[must_use]
    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    #[must_use]
    pub fn marker(&self) -> Option<ScrollMarker> {
        self.marker
    }

    pub(crate) fn set_time_stamp(&mut self, enabled: bool) {
        self.time_stamp = enabled;
    }

    pub(crate) fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = max_lines;
    }

    pub(crate) fn set_scroll_state(&mut self, state: ScrollState) {
        if self.scroll != state {
            tracing::debug!(buffer = %self.id, from = ?self.scroll, to = ?state, "scroll state");
            self.scroll = state;
        }
    }

    pub(crate) fn save_position(&mut self, fraction: f64, marker: ScrollMarker) {
        self.scroll_position = fraction.clamp(0.0, 1.0);
        self.marker = Some(marker);
    }

    /// Write one message as a new line.
    pub(crate) fn append(
        &mut self,
        message: &FormattedMessage,
        matcher: &UrlMatcher,
        stamps: &dyn StampFormatter,
    ) {
        let ctx = WriteContext { matcher, stamps, time_stamp: self.time_stamp };
        self.push_line(compose_line(message, &ctx));
    }

    /// Write a left and right region as one line. Does nothing when both
    /// are absent.
    pub(crate) fn append_indent(
        &mut self,
        left: Option<&FormattedMessage>,
        right: Option<&FormattedMessage>,
        matcher: &UrlMatcher,
        stamps: &dyn StampFormatter,
    ) {
        if left.is_none() && right.is_none() {
            return;
        }
        let ctx = WriteContext { matcher, stamps, time_stamp: self.time_stamp };
        self.push_line(compose_indent(left, right, &ctx));
    }

    fn push_line(&mut self, line: StyledLine) {
        self.store.push(line);
        self.num_lines += 1;
        self.evict();
    }

    /// Trim the oldest lines down to `max_lines` in one batch.
    fn evict(&mut self) -> usize {
        if self.max_lines == 0 || self.num_lines <= self.max_lines {
            return 0;
        }
        let excess = self.num_lines - self.max_lines;
        let removed = self.store.trim_front(excess);
        self.num_lines = self.max_lines;
        crate::perf::mark("scrollback::evict", "lines", removed);
        tracing::debug!(
            buffer = %self.id,
            removed,
            max_lines = self.max_lines,
            "evicted scrollback"
        );
        removed
    }

    /// Remove the newest `lines` lines, or everything when `lines` is 0.
    pub(crate) fn clear(&mut self, lines: usize) {
        if lines == 0 {
            self.store.clear();
            self.num_lines = 0;
        } else {
            let removed = self.store.truncate_back(lines);
            self.num_lines -= removed;
        }
    }
}
