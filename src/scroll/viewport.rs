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

/// A snapshot of the viewport's scroll geometry, all in the same unit
/// (pixels, rows, whatever the display provider measures in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Position of the top edge of the visible page.
    pub offset: f64,
    /// Total height of the content.
    pub extent: f64,
    /// Height of the visible page.
    pub page: f64,
}

impl ViewportMetrics {
    /// Largest offset that still fills a page.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.extent - self.page).max(0.0)
    }

    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        (self.max_offset() - self.offset).max(0.0)
    }

    /// Normalized position, 0 at the top and 1 at the bottom. Content that
    /// fits on one page counts as the bottom.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let max = self.max_offset();
        if max <= 0.0 { 1.0 } else { (self.offset / max).clamp(0.0, 1.0) }
    }

    /// Whether the page is within `threshold` pages of the bottom.
    #[must_use]
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.distance_from_bottom() <= threshold * self.page
    }

    #[must_use]
    pub fn marker(&self) -> ScrollMarker {
        ScrollMarker { offset: self.offset, extent: self.extent }
    }
}

/// Exact scroll position saved when a buffer is detached. Only valid while
/// the content extent is unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMarker {
    pub offset: f64,
    pub extent: f64,
}

/// The display surface a view scrolls.
pub trait Viewport {
    /// Current geometry, or `None` while it cannot be measured.
    fn metrics(&self) -> Option<ViewportMetrics>;

    fn scroll_to(&mut self, offset: f64);

    fn scroll_to_bottom(&mut self) {
        if let Some(metrics) = self.metrics() {
            self.scroll_to(metrics.max_offset());
        }
    }

    /// Ask the display provider to repaint.
    fn queue_redraw(&mut self) {}
}
