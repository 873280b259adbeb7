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

//! The indexed color table shared by every buffer on a view.

use crate::format::IRC_COLORS;
use serde::{Deserialize, Serialize};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Reserved colors that follow the 99 IRC colors in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemColor {
    MarkForeground,
    MarkBackground,
    Foreground,
    Background,
    MarkerLine,
    TabNewData,
    TabNickMentioned,
    TabNewMessage,
    AwayUser,
    SpellCheck,
}

impl SystemColor {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(IRC_COLORS) + self as usize
    }
}

/// Total entries: the IRC colors plus the system colors.
pub const PALETTE_LEN: usize = IRC_COLORS as usize + 10;

/// Maps a color index to RGB.
pub trait PaletteProvider {
    fn color(&self, index: usize) -> Option<Rgb>;

    fn system(&self, color: SystemColor) -> Option<Rgb> {
        self.color(color.index())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_LEN],
}

impl Palette {
    /// Replace one entry. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, rgb: Rgb) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = rgb;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_COLORS }
    }
}

impl PaletteProvider for Palette {
    fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }
}

const DEFAULT_COLORS: [Rgb; PALETTE_LEN] = [
    // 0-15: classic mIRC colors
    Rgb(0xff, 0xff, 0xff), // white
    Rgb(0x00, 0x00, 0x00), // black
    Rgb(0x00, 0x00, 0x7f), // blue
    Rgb(0x00, 0x93, 0x00), // green
    Rgb(0xff, 0x00, 0x00), // red
    Rgb(0x7f, 0x00, 0x00), // brown
    Rgb(0x9c, 0x00, 0x9c), // purple
    Rgb(0xfc, 0x7f, 0x00), // orange
    Rgb(0xff, 0xff, 0x00), // yellow
    Rgb(0x00, 0xfc, 0x00), // light green
    Rgb(0x00, 0x93, 0x93), // cyan
    Rgb(0x00, 0xff, 0xff), // light cyan
    Rgb(0x00, 0x00, 0xfc), // light blue
    Rgb(0xff, 0x00, 0xff), // pink
    Rgb(0x7f, 0x7f, 0x7f), // grey
    Rgb(0xd2, 0xd2, 0xd2), // light grey
    // 16-87: extended color cube
    Rgb(0x47, 0x00, 0x00),
    Rgb(0x47, 0x21, 0x00),
    Rgb(0x47, 0x47, 0x00),
    Rgb(0x32, 0x47, 0x00),
    Rgb(0x00, 0x47, 0x00),
    Rgb(0x00, 0x47, 0x2c),
    Rgb(0x00, 0x47, 0x47),
    Rgb(0x00, 0x27, 0x47),
    Rgb(0x00, 0x00, 0x47),
    Rgb(0x2e, 0x00, 0x47),
    Rgb(0x47, 0x00, 0x47),
    Rgb(0x47, 0x00, 0x2a),
    Rgb(0x74, 0x00, 0x00),
    Rgb(0x74, 0x3a, 0x00),
    Rgb(0x74, 0x74, 0x00),
    Rgb(0x51, 0x74, 0x00),
    Rgb(0x00, 0x74, 0x00),
    Rgb(0x00, 0x74, 0x49),
    Rgb(0x00, 0x74, 0x74),
    Rgb(0x00, 0x40, 0x74),
    Rgb(0x00, 0x00, 0x74),
    Rgb(0x4b, 0x00, 0x74),
    Rgb(0x74, 0x00, 0x74),
    Rgb(0x74, 0x00, 0x45),
    Rgb(0xb5, 0x00, 0x00),
    Rgb(0xb5, 0x63, 0x00),
    Rgb(0xb5, 0xb5, 0x00),
    Rgb(0x7d, 0xb5, 0x00),
    Rgb(0x00, 0xb5, 0x00),
    Rgb(0x00, 0xb5, 0x71),
    Rgb(0x00, 0xb5, 0xb5),
    Rgb(0x00, 0x63, 0xb5),
    Rgb(0x00, 0x00, 0xb5),
    Rgb(0x75, 0x00, 0xb5),
    Rgb(0xb5, 0x00, 0xb5),
    Rgb(0xb5, 0x00, 0x6b),
    Rgb(0xff, 0x00, 0x00),
    Rgb(0xff, 0x8c, 0x00),
    Rgb(0xff, 0xff, 0x00),
    Rgb(0xb2, 0xff, 0x00),
    Rgb(0x00, 0xff, 0x00),
    Rgb(0x00, 0xff, 0xa0),
    Rgb(0x00, 0xff, 0xff),
    Rgb(0x00, 0x8c, 0xff),
    Rgb(0x00, 0x00, 0xff),
    Rgb(0xa5, 0x00, 0xff),
    Rgb(0xff, 0x00, 0xff),
    Rgb(0xff, 0x00, 0x98),
    Rgb(0xff, 0x59, 0x59),
    Rgb(0xff, 0xb4, 0x59),
    Rgb(0xff, 0xff, 0x71),
    Rgb(0xcf, 0xff, 0x60),
    Rgb(0x6f, 0xff, 0x6f),
    Rgb(0x65, 0xff, 0xc9),
    Rgb(0x6d, 0xff, 0xff),
    Rgb(0x59, 0xb4, 0xff),
    Rgb(0x59, 0x59, 0xff),
    Rgb(0xc4, 0x59, 0xff),
    Rgb(0xff, 0x66, 0xff),
    Rgb(0xff, 0x59, 0xbc),
    Rgb(0xff, 0x9c, 0x9c),
    Rgb(0xff, 0xd3, 0x9c),
    Rgb(0xff, 0xff, 0x9c),
    Rgb(0xe2, 0xff, 0x9c),
    Rgb(0x9c, 0xff, 0x9c),
    Rgb(0x9c, 0xff, 0xdb),
    Rgb(0x9c, 0xff, 0xff),
    Rgb(0x9c, 0xd3, 0xff),
    Rgb(0x9c, 0x9c, 0xff),
    Rgb(0xdc, 0x9c, 0xff),
    Rgb(0xff, 0x9c, 0xff),
    Rgb(0xff, 0x94, 0xd3),
    // 88-98: greyscale ramp
    Rgb(0x00, 0x00, 0x00),
    Rgb(0x13, 0x13, 0x13),
    Rgb(0x28, 0x28, 0x28),
    Rgb(0x36, 0x36, 0x36),
    Rgb(0x4d, 0x4d, 0x4d),
    Rgb(0x65, 0x65, 0x65),
    Rgb(0x81, 0x81, 0x81),
    Rgb(0x9f, 0x9f, 0x9f),
    Rgb(0xbc, 0xbc, 0xbc),
    Rgb(0xe2, 0xe2, 0xe2),
    Rgb(0xff, 0xff, 0xff),
    // system colors, in `SystemColor` order
    Rgb(0xd3, 0xd7, 0xcf),
    Rgb(0x20, 0x4a, 0x87),
    Rgb(0x25, 0x29, 0x2b),
    Rgb(0xfa, 0xfa, 0xf8),
    Rgb(0x8f, 0x39, 0x02),
    Rgb(0x34, 0x65, 0xa4),
    Rgb(0x4e, 0x9a, 0x06),
    Rgb(0xce, 0x5c, 0x00),
    Rgb(0x88, 0x8a, 0x85),
    Rgb(0xa4, 0x00, 0x00),
];
