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

//! The viewport-side owner of buffers.
//!
//! A [`TextView`] holds the tag table shared by every buffer created against
//! it, the buffer registry, the attached buffer and the one pending viewport
//! task. All entry points take the current time so the host decides what
//! "now" is; unknown buffer ids and empty input are ignored.

use crate::format::{self, Timestamp};
use crate::palette::Palette;
use crate::scroll::{
    AutoScroll, DEFAULT_BACKLOG_TIMEOUT, DEFAULT_BOTTOM_THRESHOLD, DebounceTimer, ScrollSource,
    ScrollState, Viewport, ViewportTask,
};
use crate::scrollback::{Buffer, BufferId, LocalClock, StampFormatter, Tag, TagTable};
use crate::url::{UrlMatcher, UrlPattern, default_patterns};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_LINES: usize = 1000;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(30);

type UrlHandler = Box<dyn FnMut(&str)>;

/// Everything a view reads from configuration.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Scrollback limit for new buffers, 0 for unbounded.
    pub max_lines: usize,
    pub time_stamps: bool,
    /// Only consulted by the display provider.
    pub word_wrap: bool,
    /// Distance from the bottom, in pages, that still counts as the bottom.
    pub bottom_threshold: f64,
    pub debounce: Duration,
    pub backlog_timeout: Duration,
    pub palette: Palette,
    pub url_patterns: Vec<UrlPattern>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            time_stamps: true,
            word_wrap: true,
            bottom_threshold: DEFAULT_BOTTOM_THRESHOLD,
            debounce: DEFAULT_DEBOUNCE,
            backlog_timeout: DEFAULT_BACKLOG_TIMEOUT,
            palette: Palette::default(),
            url_patterns: default_patterns(),
        }
    }
}

pub struct TextView<V: Viewport> {
    viewport: V,
    settings: ViewSettings,
    tags: Rc<TagTable>,
    matcher: UrlMatcher,
    stamps: Box<dyn StampFormatter>,
    policy: AutoScroll,
    timer: DebounceTimer<ViewportTask>,
    buffers: HashMap<BufferId, Buffer>,
    next_id: u64,
    attached: Option<BufferId>,
    url_handler: Option<UrlHandler>,
}

impl<V: Viewport> TextView<V> {
    pub fn new(viewport: V, settings: ViewSettings) -> Self {
        let tags = Rc::new(TagTable::new(&settings.palette));
        let matcher = UrlMatcher::new(&settings.url_patterns);
        tracing::debug!(
            configured = settings.url_patterns.len(),
            active = matcher.active_patterns(),
            "url matcher ready"
        );
        let policy = AutoScroll::new(settings.bottom_threshold, settings.backlog_timeout);
        let timer = DebounceTimer::new(settings.debounce);
        Self {
            viewport,
            settings,
            tags,
            matcher,
            stamps: Box::new(LocalClock),
            policy,
            timer,
            buffers: HashMap::new(),
            next_id: 1,
            attached: None,
            url_handler: None,
        }
    }

    /// Replace the timestamp prefix formatter.
    #[must_use]
    pub fn with_stamp_formatter(mut self, stamps: impl StampFormatter + 'static) -> Self {
        self.stamps = Box::new(stamps);
        self
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    // ----- buffer registry -----

    /// Create a buffer for a new chat context. It starts out loading backlog.
    pub fn buffer_new(&mut self, owner: impl Into<String>) -> BufferId {
        self.buffer_new_at(owner, Instant::now())
    }

    /// [`Self::buffer_new`] with an explicit creation time.
    pub fn buffer_new_at(&mut self, owner: impl Into<String>, now: Instant) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        let buffer = Buffer::new(
            id,
            owner.into(),
            self.settings.max_lines,
            self.settings.time_stamps,
            Rc::clone(&self.tags),
            now,
        );
        tracing::debug!(buffer = %id, owner = buffer.owner(), "buffer created");
        self.buffers.insert(id, buffer);
        id
    }

    pub fn buffer_free(&mut self, id: BufferId) {
        if self.buffers.remove(&id).is_none() {
            tracing::trace!(buffer = %id, "buffer_free on unknown buffer");
            return;
        }
        if self.attached == Some(id) {
            self.attached = None;
            self.timer.cancel();
            self.viewport.queue_redraw();
        }
        tracing::debug!(buffer = %id, "buffer freed");
    }

    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    pub fn attached(&self) -> Option<BufferId> {
        self.attached
    }

    pub fn attached_buffer(&self) -> Option<&Buffer> {
        self.attached.and_then(|id| self.buffers.get(&id))
    }

    /// Unknown buffers count as empty.
    pub fn is_empty(&self, id: BufferId) -> bool {
        self.buffers.get(&id).is_none_or(Buffer::is_empty)
    }

    // ----- settings -----

    /// New limit for the view default and every buffer. Applies at the next
    /// append of each buffer.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.settings.max_lines = max_lines;
        for buffer in self.buffers.values_mut() {
            buffer.set_max_lines(max_lines);
        }
    }

    pub fn set_time_stamp(&mut self, id: BufferId, enabled: bool) {
        match self.buffers.get_mut(&id) {
            Some(buffer) => buffer.set_time_stamp(enabled),
            None => tracing::trace!(buffer = %id, "set_time_stamp on unknown buffer"),
        }
    }

    /// Callback invoked with the link text when a link is clicked.
    pub fn set_url_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.url_handler = Some(Box::new(handler));
    }

    // ----- content -----

    /// Append one line parsed from `text`.
    pub fn append(
        &mut self,
        id: BufferId,
        text: &[u8],
        timestamp: Option<Timestamp>,
        now: Instant,
    ) {
        let Some(message) = format::parse(text, timestamp) else {
            tracing::trace!(buffer = %id, "append with empty text");
            return;
        };
        let Some(buffer) = self.buffers.get_mut(&id) else {
            tracing::trace!(buffer = %id, "append to unknown buffer");
            return;
        };
        buffer.append(&message, &self.matcher, self.stamps.as_ref());
        self.after_append(id, now);
    }

    /// Append one line made of a left and right region. The timestamp
    /// belongs to the left region.
    pub fn append_indent(
        &mut self,
        id: BufferId,
        left: &[u8],
        right: &[u8],
        timestamp: Option<Timestamp>,
        now: Instant,
    ) {
        let left = format::parse(left, timestamp);
        let right = format::parse(right, None);
        if left.is_none() && right.is_none() {
            tracing::trace!(buffer = %id, "append_indent with empty regions");
            return;
        }
        let Some(buffer) = self.buffers.get_mut(&id) else {
            tracing::trace!(buffer = %id, "append_indent to unknown buffer");
            return;
        };
        buffer.append_indent(left.as_ref(), right.as_ref(), &self.matcher, self.stamps.as_ref());
        self.after_append(id, now);
    }

    /// Remove the newest `lines` lines, or everything when `lines` is 0.
    pub fn clear(&mut self, id: BufferId, lines: usize) {
        let Some(buffer) = self.buffers.get_mut(&id) else {
            tracing::trace!(buffer = %id, "clear on unknown buffer");
            return;
        };
        buffer.clear(lines);
        if self.attached == Some(id) {
            self.viewport.queue_redraw();
        }
    }

    fn after_append(&mut self, id: BufferId, now: Instant) {
        self.expire_backlogs(now);
        if self.attached != Some(id) {
            return;
        }
        let Some(buffer) = self.buffers.get(&id) else {
            return;
        };
        // Until a pending restore runs, the viewport still shows the
        // previous buffer's geometry and cannot be judged.
        let restoring = self.timer.pending() == Some(&ViewportTask::Restore);
        let metrics = self.viewport.metrics();
        if !restoring && self.policy.should_snap(buffer.scroll_state(), metrics.as_ref()) {
            self.timer.arm(ViewportTask::SnapToBottom, now);
        }
        self.viewport.queue_redraw();
    }

    // ----- scrolling -----

    /// Display `id` in the viewport. The outgoing buffer's position is saved;
    /// the incoming one is snapped to the bottom or restored once the display
    /// has laid it out.
    pub fn buffer_show(&mut self, id: BufferId, render: bool, now: Instant) {
        if !self.buffers.contains_key(&id) {
            tracing::trace!(buffer = %id, "buffer_show on unknown buffer");
            return;
        }
        self.expire_backlogs(now);

        if self.attached != Some(id) {
            if let Some(outgoing) = self.attached
                && let Some(metrics) = self.viewport.metrics()
                && let Some(buffer) = self.buffers.get_mut(&outgoing)
            {
                buffer.save_position(metrics.fraction(), metrics.marker());
            }
            self.attached = Some(id);

            let follow = self.buffers.get(&id).is_some_and(Buffer::auto_scroll);
            let task = if follow { ViewportTask::SnapToBottom } else { ViewportTask::Restore };
            self.timer.arm(task, now);
            tracing::debug!(buffer = %id, ?task, "buffer shown");
        }

        if render {
            self.viewport.queue_redraw();
        }
    }

    /// Report that the viewport moved. Only user moves affect the state.
    pub fn on_scroll(&mut self, source: ScrollSource, now: Instant) {
        if source == ScrollSource::Programmatic {
            return;
        }
        self.expire_backlogs(now);
        let Some(id) = self.attached else {
            return;
        };
        let Some(metrics) = self.viewport.metrics() else {
            tracing::trace!("scroll without viewport metrics");
            return;
        };
        let state = self.policy.classify(&metrics);
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.set_scroll_state(state);
        }
        self.timer.arm(ViewportTask::Reclassify, now);
    }

    /// Run whatever is due at `now`: backlog timeouts and the pending
    /// viewport task.
    pub fn poll(&mut self, now: Instant) {
        self.expire_backlogs(now);
        if let Some(task) = self.timer.poll(now) {
            self.run_task(task);
        }
    }

    /// When [`Self::poll`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let backlog = self
            .buffers
            .values()
            .filter(|b| b.loading_backlog())
            .map(|b| self.policy.backlog_deadline(b.created_at()))
            .min();
        match (self.timer.deadline(), backlog) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run_task(&mut self, task: ViewportTask) {
        let Some(id) = self.attached else {
            return;
        };
        let Some(buffer) = self.buffers.get_mut(&id) else {
            return;
        };
        match task {
            ViewportTask::SnapToBottom => {
                self.viewport.scroll_to_bottom();
                if !buffer.loading_backlog() {
                    buffer.set_scroll_state(ScrollState::AtBottom);
                }
            }
            ViewportTask::Restore => {
                let Some(metrics) = self.viewport.metrics() else {
                    return;
                };
                let target = match buffer.marker() {
                    Some(marker) if (marker.extent - metrics.extent).abs() < f64::EPSILON => {
                        marker.offset
                    }
                    _ => buffer.scroll_position() * metrics.max_offset(),
                };
                self.viewport.scroll_to(target);
            }
            ViewportTask::Reclassify => {
                let Some(metrics) = self.viewport.metrics() else {
                    return;
                };
                buffer.set_scroll_state(self.policy.classify(&metrics));
            }
        }
        self.viewport.queue_redraw();
    }

    /// Move every buffer whose backlog window has passed out of
    /// `LoadingBacklog`. The attached one is measured; a detached one has
    /// never been scrolled and lands at the bottom.
    fn expire_backlogs(&mut self, now: Instant) {
        let snap_pending = self.timer.pending() == Some(&ViewportTask::SnapToBottom);
        for buffer in self.buffers.values_mut() {
            if !buffer.loading_backlog() || !self.policy.backlog_expired(buffer.created_at(), now) {
                continue;
            }
            let measured = if self.attached == Some(buffer.id()) && !snap_pending {
                self.viewport.metrics()
            } else {
                None
            };
            let state = measured.map_or(ScrollState::AtBottom, |m| self.policy.classify(&m));
            buffer.set_scroll_state(state);
        }
    }

    // ----- links -----

    /// Text of the link covering `column` of line `line` in the attached
    /// buffer.
    pub fn url_at(&self, line: usize, column: usize) -> Option<String> {
        let styled = self.attached_buffer()?.store().line(line)?;
        let span = styled
            .spans()
            .iter()
            .find(|span| span.tag == Tag::Url && span.contains(column))?;
        Some(styled.text().chars().skip(span.start).take(span.end - span.start).collect())
    }

    /// Open the link under `column` of line `line`. Returns whether a link
    /// was handed to the URL handler.
    pub fn click(&mut self, line: usize, column: usize) -> bool {
        let Some(url) = self.url_at(line, column) else {
            return false;
        };
        match self.url_handler.as_mut() {
            Some(handler) => {
                tracing::debug!(%url, "opening link");
                handler(&url);
                true
            }
            None => {
                tracing::debug!(%url, "link clicked without a handler");
                false
            }
        }
    }
}
