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

pub mod scrollback;
pub mod theme;

pub use scrollback::{RenderedRows, RowRef, TerminalViewport, hit_test, row_breaks};

use crate::app::App;
use crate::scroll::ScrollState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let _t = app.perf.as_ref().map(|p| p.span("ui::render"));
    let [body, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    scrollback::render(frame, body, app);
    render_status(frame, status, app);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    let attached = app.view.attached();
    for (i, source) in app.sources.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(theme::TAB_SEPARATOR, Style::default().fg(theme::DIM)));
        }
        let mut style = Style::default();
        if Some(source.id) == attached {
            style = style.fg(theme::ACCENT).add_modifier(Modifier::BOLD);
        } else if source.closed && !app.follow {
            style = style.fg(theme::DIM);
        }
        spans.push(Span::styled(source.label.clone(), style));
    }

    if let Some(buffer) = app.view.attached_buffer() {
        let (label, color) = match buffer.scroll_state() {
            ScrollState::LoadingBacklog => ("backlog", theme::STATE_BACKLOG),
            ScrollState::AtBottom => ("follow", theme::STATE_FOLLOW),
            ScrollState::Scrolled => ("scrolled", theme::STATE_SCROLLED),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("[{label}]"), Style::default().fg(color)));
        spans.push(Span::styled(
            format!(" {} lines", buffer.num_lines()),
            Style::default().fg(theme::DIM),
        ));
    }

    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(theme::DIM)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::STATUS_BG));
    frame.render_widget(status, area);
}
