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

use ircview::app::{App, SourceEvent};
use ircview::config::Settings;
use ircview::scroll::{Viewport, ViewportMetrics};
use ircview::scrollback::BufferId;
use ircview::{TextView, ViewSettings};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::time::{Duration, Instant};

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Settings with the timestamp prefix turned off so rendered text is
/// predictable.
pub fn plain_settings() -> Settings {
    Settings { time_stamps: false, ..Settings::default() }
}

/// Build an `App` for integration testing.
/// No terminal, no readers -- just state.
pub fn test_app(labels: &[&str], now: Instant) -> App {
    let labels = labels.iter().map(|&l| l.to_owned()).collect();
    App::new(&plain_settings(), labels, false, now)
}

/// Helper: feed one raw line from `source` into the app.
pub fn send_line(app: &mut App, source: usize, line: &[u8], now: Instant) {
    let event = SourceEvent::Line { source, bytes: line.to_vec() };
    ircview::app::handle_source_event_at(app, event, now);
}

pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).expect("test backend")
}

pub fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) {
    terminal.draw(|frame| ircview::ui::render(frame, app)).expect("draw");
}

/// Text of screen row `y`, trailing blanks removed.
pub fn screen_row(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    let row: String = (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect();
    row.trim_end().to_owned()
}

/// A viewport the test lays out by hand: it sets `extent` the way a display
/// would after drawing.
#[derive(Debug, Clone)]
pub struct LineViewport {
    pub offset: f64,
    pub extent: f64,
    pub page: f64,
}

impl LineViewport {
    pub fn new(page: f64) -> Self {
        Self { offset: 0.0, extent: 0.0, page }
    }

    pub fn max_offset(&self) -> f64 {
        (self.extent - self.page).max(0.0)
    }

    pub fn at_bottom(&self) -> bool {
        (self.max_offset() - self.offset).abs() < f64::EPSILON
    }
}

impl Viewport for LineViewport {
    fn metrics(&self) -> Option<ViewportMetrics> {
        Some(ViewportMetrics { offset: self.offset, extent: self.extent, page: self.page })
    }

    fn scroll_to(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }
}

pub fn line_view(settings: ViewSettings) -> TextView<LineViewport> {
    TextView::new(LineViewport::new(20.0), settings)
}

/// Every line of buffer content as plain text.
pub fn lines_of<V: Viewport>(view: &TextView<V>, id: BufferId) -> Vec<String> {
    view.buffer(id)
        .map(|b| b.store().lines().map(|l| l.text().to_owned()).collect())
        .unwrap_or_default()
}
