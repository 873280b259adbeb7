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

use super::source::SourceEvent;
use crate::config::Settings;
use crate::perf::Profiler;
use crate::scrollback::BufferId;
use crate::ui::{RenderedRows, TerminalViewport};
use crate::view::TextView;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// One input and the buffer its lines land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    pub id: BufferId,
    pub label: String,
    /// The reader reached its end or failed.
    pub closed: bool,
}

pub struct App {
    pub view: TextView<TerminalViewport>,
    /// Indexed by source number.
    pub sources: Vec<SourceBuffer>,
    pub event_tx: mpsc::UnboundedSender<SourceEvent>,
    pub event_rx: mpsc::UnboundedReceiver<SourceEvent>,
    pub should_quit: bool,
    pub follow: bool,
    pub follow_poll: Duration,
    /// Rows drawn in the last frame, for mouse hit-testing.
    pub rendered_rows: RenderedRows,
    /// Short message shown in the status bar.
    pub notice: Option<String>,
    pub perf: Option<Profiler>,
}

impl App {
    /// One buffer per label; the first is shown.
    pub fn new(settings: &Settings, labels: Vec<String>, follow: bool, now: Instant) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut view = TextView::new(TerminalViewport::new(), settings.view_settings());
        let sources: Vec<SourceBuffer> = labels
            .into_iter()
            .map(|label| SourceBuffer {
                id: view.buffer_new_at(label.clone(), now),
                label,
                closed: false,
            })
            .collect();
        if let Some(first) = sources.first() {
            view.buffer_show(first.id, true, now);
        }

        Self {
            view,
            sources,
            event_tx,
            event_rx,
            should_quit: false,
            follow,
            follow_poll: settings.follow_poll(),
            rendered_rows: RenderedRows::default(),
            notice: None,
            perf: None,
        }
    }

    pub fn buffer_for(&self, source: usize) -> Option<BufferId> {
        self.sources.get(source).map(|s| s.id)
    }

    /// Show the buffer `step` places after the attached one, wrapping.
    pub fn switch_buffer(&mut self, step: isize, now: Instant) {
        let count = self.sources.len();
        if count == 0 {
            return;
        }
        let current = self
            .view
            .attached()
            .and_then(|id| self.sources.iter().position(|s| s.id == id))
            .unwrap_or(0);
        let count_signed = isize::try_from(count).unwrap_or(isize::MAX);
        let next = (isize::try_from(current).unwrap_or(0) + step).rem_euclid(count_signed);
        let next = usize::try_from(next).unwrap_or(0);
        if let Some(source) = self.sources.get(next) {
            self.view.buffer_show(source.id, true, now);
        }
    }

    /// Buffer id and label of the attached buffer.
    pub fn attached_source(&self) -> Option<&SourceBuffer> {
        let id = self.view.attached()?;
        self.sources.iter().find(|s| s.id == id)
    }
}
