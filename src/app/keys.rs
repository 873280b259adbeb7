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
use super::events::{scroll_rows, scroll_to_end};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

fn page_rows(app: &App) -> isize {
    isize::try_from(app.view.viewport().page_rows()).unwrap_or(isize::MAX)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'c') || is_ctrl_char_shortcut(key, 'q') {
        app.should_quit = true;
        return;
    }
    if is_ctrl_char_shortcut(key, 'l') {
        if let Some(id) = app.view.attached() {
            app.view.clear(id, 0);
        }
        return;
    }

    let now = Instant::now();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('t') => {
            if let Some(buffer) = app.view.attached_buffer() {
                let (id, enabled) = (buffer.id(), !buffer.time_stamp());
                app.view.set_time_stamp(id, enabled);
                app.notice =
                    Some(if enabled { "timestamps on" } else { "timestamps off" }.to_owned());
                app.view.viewport_mut().mark_dirty();
            }
        }
        KeyCode::PageUp => scroll_rows(app, -page_rows(app)),
        KeyCode::PageDown => scroll_rows(app, page_rows(app)),
        KeyCode::Up => scroll_rows(app, -1),
        KeyCode::Down => scroll_rows(app, 1),
        KeyCode::Home => scroll_rows(app, isize::MIN),
        KeyCode::End => scroll_to_end(app),
        KeyCode::Tab => app.switch_buffer(1, now),
        KeyCode::BackTab => app.switch_buffer(-1, now),
        _ => {}
    }
}
