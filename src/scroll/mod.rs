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

//! Auto-scroll tracking: the per-buffer state machine, the debounced
//! viewport task and the viewport measurement contract.

mod debounce;
mod tracker;
mod viewport;

pub use debounce::DebounceTimer;
pub use tracker::{
    AutoScroll, DEFAULT_BACKLOG_TIMEOUT, DEFAULT_BOTTOM_THRESHOLD, ScrollSource, ScrollState,
    ViewportTask,
};
pub use viewport::{ScrollMarker, Viewport, ViewportMetrics};
