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

use crate::palette::Rgb;
use crate::scrollback::TextStyle;
use ratatui::style::{Color, Modifier, Style};

// Accent
pub const ACCENT: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const STATUS_BG: Color = Color::Rgb(40, 44, 52);
pub const TAB_SEPARATOR: &str = " │ ";

// Follow-state indicator colors
pub const STATE_BACKLOG: Color = Color::Yellow;
pub const STATE_FOLLOW: Color = Color::Green;
pub const STATE_SCROLLED: Color = Color::Cyan;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Map a resolved tag style onto a terminal style.
pub fn style(text: TextStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = text.fg {
        style = style.fg(color(fg));
    }
    if let Some(bg) = text.bg {
        style = style.bg(color(bg));
    }
    for (enabled, modifier) in [
        (text.bold, Modifier::BOLD),
        (text.italic, Modifier::ITALIC),
        (text.underline, Modifier::UNDERLINED),
        (text.strikethrough, Modifier::CROSSED_OUT),
    ] {
        if enabled {
            style = style.add_modifier(modifier);
        }
    }
    style
}
