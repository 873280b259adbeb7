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

//! The terminal display provider: wraps styled lines into rows, scrolls
//! them, and maps screen cells back to line positions.

use crate::app::App;
use crate::scroll::{Viewport, ViewportMetrics};
use crate::scrollback::{StyledLine, TagTable};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

/// Row-based viewport. Offsets are whole rows; the extent and page size are
/// only known after [`TerminalViewport::layout`] ran for the current frame.
#[derive(Debug, Default)]
pub struct TerminalViewport {
    offset: usize,
    extent: usize,
    page: usize,
    measured: bool,
    /// Stay on the last row across layouts until something scrolls away.
    pinned: bool,
    dirty: bool,
}

impl TerminalViewport {
    #[must_use]
    pub fn new() -> Self {
        Self { pinned: true, dirty: true, ..Self::default() }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.extent.saturating_sub(self.page)
    }

    /// Record this frame's geometry and resolve the offset against it.
    pub fn layout(&mut self, extent: usize, page: usize) {
        self.extent = extent;
        self.page = page;
        self.measured = page > 0;
        let max = self.max_offset();
        self.offset = if self.pinned { max } else { self.offset.min(max) };
    }

    /// Move by `rows` (negative is up). This is a user move.
    pub fn scroll_by(&mut self, rows: isize) {
        self.pinned = false;
        self.offset = self.offset.saturating_add_signed(rows).min(self.max_offset());
        self.dirty = true;
    }

    /// Rows moved by a page key: one page minus one row of overlap.
    #[must_use]
    pub fn page_rows(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a frame has been requested since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Viewport for TerminalViewport {
    #[allow(clippy::cast_precision_loss)]
    fn metrics(&self) -> Option<ViewportMetrics> {
        self.measured.then(|| ViewportMetrics {
            offset: self.offset as f64,
            extent: self.extent as f64,
            page: self.page as f64,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scroll_to(&mut self, offset: f64) {
        self.pinned = false;
        self.offset = (offset.max(0.0).round() as usize).min(self.max_offset());
        self.dirty = true;
    }

    fn scroll_to_bottom(&mut self) {
        self.pinned = true;
        self.offset = self.max_offset();
        self.dirty = true;
    }

    fn queue_redraw(&mut self) {
        self.dirty = true;
    }
}

/// One screen row: characters `start..end` of the line with sequence
/// number `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub seq: u64,
    pub start: usize,
    pub end: usize,
}

/// The rows drawn in the last frame, for hit-testing clicks.
#[derive(Debug, Default)]
pub struct RenderedRows {
    pub area: Rect,
    pub rows: Vec<RowRef>,
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Character ranges of the rows `text` occupies at `width` columns.
/// Wrapping prefers the last space on a row. Without wrapping a line is
/// always one row.
pub fn row_breaks(text: &str, width: usize, wrap: bool) -> Vec<(usize, usize)> {
    let chars: Vec<char> = text.chars().collect();
    if !wrap || width == 0 {
        return vec![(0, chars.len())];
    }

    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    let mut break_after: Option<usize> = None;
    for (i, &ch) in chars.iter().enumerate() {
        let w = char_width(ch);
        while used + w > width && i > start {
            let end = break_after.filter(|&b| b > start).unwrap_or(i);
            rows.push((start, end));
            start = end;
            used = chars[start..i].iter().map(|&c| char_width(c)).sum();
            break_after = None;
        }
        used += w;
        if ch == ' ' {
            break_after = Some(i + 1);
        }
    }
    rows.push((start, chars.len()));
    rows
}

/// Spans for characters `start..end` of `line`, split wherever the set of
/// covering tags changes.
fn styled_row(
    line: &StyledLine,
    chars: &[char],
    start: usize,
    end: usize,
    table: &TagTable,
) -> Line<'static> {
    let mut cuts = vec![start, end];
    for span in line.spans() {
        for edge in [span.start, span.end] {
            if edge > start && edge < end {
                cuts.push(edge);
            }
        }
    }
    cuts.sort_unstable();
    cuts.dedup();

    let spans: Vec<Span<'static>> = cuts
        .windows(2)
        .map(|w| {
            let text: String = chars[w[0]..w[1]].iter().collect();
            Span::styled(text, theme::style(table.resolve(line.tags_at(w[0]))))
        })
        .collect();
    Line::from(spans)
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let width = usize::from(area.width);
    let page = usize::from(area.height);
    let wrap = app.view.settings().word_wrap;

    let Some(buffer) = app.view.attached_buffer() else {
        app.rendered_rows = RenderedRows { area, rows: Vec::new() };
        let hint = Line::styled("no buffer", Style::default().fg(theme::DIM));
        frame.render_widget(Paragraph::new(hint), area);
        return;
    };

    let _t = crate::perf::span("ui::scrollback", "lines", buffer.num_lines());
    let first_seq = buffer.store().first_seq();
    let mut rows = Vec::new();
    for (index, line) in buffer.store().lines().enumerate() {
        let seq = first_seq + index as u64;
        rows.extend(
            row_breaks(line.text(), width, wrap)
                .into_iter()
                .map(|(start, end)| RowRef { seq, start, end }),
        );
    }

    let viewport = app.view.viewport_mut();
    viewport.layout(rows.len(), page);
    let offset = viewport.offset();
    let visible: Vec<RowRef> = rows.into_iter().skip(offset).take(page).collect();

    let mut lines = Vec::with_capacity(visible.len());
    if let Some(buffer) = app.view.attached_buffer() {
        let table = buffer.tag_table();
        let mut cached: Option<(u64, Vec<char>)> = None;
        for row in &visible {
            let store = buffer.store();
            let Some(line) = store.index_of_seq(row.seq).and_then(|i| store.line(i)) else {
                continue;
            };
            if cached.as_ref().is_none_or(|(seq, _)| *seq != row.seq) {
                cached = Some((row.seq, line.text().chars().collect()));
            }
            if let Some((_, chars)) = cached.as_ref() {
                lines.push(styled_row(line, chars, row.start, row.end, table));
            }
        }
        let base = theme::style(table.base());
        frame.render_widget(Paragraph::new(Text::from(lines)).style(base), area);
    }

    app.rendered_rows = RenderedRows { area, rows: visible };
}

/// The (line index, character) under screen cell `column`,`row` of the last
/// frame.
pub fn hit_test(app: &App, column: u16, row: u16) -> Option<(usize, usize)> {
    let area = app.rendered_rows.area;
    if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
        return None;
    }
    let row_ref = app.rendered_rows.rows.get(usize::from(row - area.y))?;
    let store = app.view.attached_buffer()?.store();
    let index = store.index_of_seq(row_ref.seq)?;
    let line = store.line(index)?;

    let target = usize::from(column - area.x);
    let mut x = 0;
    let cells = line.text().chars().enumerate().skip(row_ref.start);
    for (offset, ch) in cells.take(row_ref.end - row_ref.start) {
        x += char_width(ch);
        if x > target {
            return Some((index, offset));
        }
    }
    None
}
