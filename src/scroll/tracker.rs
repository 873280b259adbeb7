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

use super::viewport::ViewportMetrics;
use std::time::{Duration, Instant};

pub const DEFAULT_BOTTOM_THRESHOLD: f64 = 0.15;
pub const DEFAULT_BACKLOG_TIMEOUT: Duration = Duration::from_secs(1);

/// Where a buffer's viewport is relative to its newest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// Freshly created; history is still arriving and every append snaps.
    LoadingBacklog,
    AtBottom,
    /// The user moved away from the bottom; appends leave the viewport alone.
    Scrolled,
}

/// Who moved the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Wheel, scrollbar or navigation key.
    User,
    /// A move the view itself issued.
    Programmatic,
}

/// Deferred viewport work, run once the display has caught up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportTask {
    SnapToBottom,
    /// Put a re-attached buffer back where it was left.
    Restore,
    /// Re-measure after the user stopped scrolling.
    Reclassify,
}

/// The auto-scroll policy. Per-buffer state lives on the buffer.
#[derive(Debug, Clone, Copy)]
pub struct AutoScroll {
    threshold: f64,
    backlog_timeout: Duration,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_THRESHOLD, DEFAULT_BACKLOG_TIMEOUT)
    }
}

impl AutoScroll {
    #[must_use]
    pub fn new(threshold: f64, backlog_timeout: Duration) -> Self {
        Self { threshold: threshold.max(0.0), backlog_timeout }
    }

    #[must_use]
    pub fn classify(&self, metrics: &ViewportMetrics) -> ScrollState {
        if metrics.near_bottom(self.threshold) {
            ScrollState::AtBottom
        } else {
            ScrollState::Scrolled
        }
    }

    /// Whether an append in `state` should schedule a bottom-snap. Outside
    /// the backlog the viewport must be measurable and near the bottom.
    #[must_use]
    pub fn should_snap(&self, state: ScrollState, metrics: Option<&ViewportMetrics>) -> bool {
        match state {
            ScrollState::LoadingBacklog => true,
            ScrollState::AtBottom | ScrollState::Scrolled => {
                metrics.is_some_and(|m| m.near_bottom(self.threshold))
            }
        }
    }

    #[must_use]
    pub fn backlog_deadline(&self, created_at: Instant) -> Instant {
        created_at + self.backlog_timeout
    }

    #[must_use]
    pub fn backlog_expired(&self, created_at: Instant, now: Instant) -> bool {
        now >= self.backlog_deadline(created_at)
    }
}
