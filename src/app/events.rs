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

use super::App;
use super::keys::handle_key;
use super::source::{SourceEvent, split_indent};
use crate::scroll::{ScrollSource, Viewport as _};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

const MOUSE_SCROLL_LINES: isize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(..) | Event::FocusGained => app.view.viewport_mut().mark_dirty(),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => scroll_rows(app, -MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => scroll_rows(app, MOUSE_SCROLL_LINES),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((line, column)) = crate::ui::hit_test(app, mouse.column, mouse.row) {
                app.view.click(line, column);
            }
        }
        _ => {}
    }
}

/// User scroll by `rows` (negative is up).
pub fn scroll_rows(app: &mut App, rows: isize) {
    app.view.viewport_mut().scroll_by(rows);
    app.view.on_scroll(ScrollSource::User, Instant::now());
}

/// User jump to the newest line.
pub fn scroll_to_end(app: &mut App) {
    app.view.viewport_mut().scroll_to_bottom();
    app.view.on_scroll(ScrollSource::User, Instant::now());
}

pub fn handle_source_event(app: &mut App, event: SourceEvent) {
    handle_source_event_at(app, event, Instant::now());
}

pub fn handle_source_event_at(app: &mut App, event: SourceEvent, now: Instant) {
    match event {
        SourceEvent::Line { source, bytes } => {
            let Some(id) = app.buffer_for(source) else {
                tracing::trace!(source, "line from unknown source");
                return;
            };
            let _t = crate::perf::span("app::append", "bytes", bytes.len());
            let stamp = Some(chrono::Utc::now());
            match split_indent(&bytes) {
                Some((left, right)) => app.view.append_indent(id, left, right, stamp, now),
                None => app.view.append(id, &bytes, stamp, now),
            }
        }
        SourceEvent::Closed { source, error } => {
            let Some(entry) = app.sources.get_mut(source) else {
                return;
            };
            entry.closed = true;
            app.notice = Some(match error {
                Some(err) => format!("{}: {err}", entry.label),
                None => format!("{}: end of input", entry.label),
            });
            tracing::debug!(source, label = %entry.label, "source closed");
            app.view.viewport_mut().mark_dirty();
        }
    }
}
