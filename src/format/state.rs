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

/// Number of indexed IRC colors a color code can select.
pub const IRC_COLORS: u8 = 99;

/// Highest value a color code may carry after clamping. `99` is the IRC
/// "default color" and is stored as `None`.
const COLOR_CODE_MAX: u8 = 99;

/// Formatting in effect for a run of text.
///
/// This is a plain value: the parser mutates one local accumulator and every
/// segment keeps its own snapshot.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
    pub hidden: bool,
    /// Foreground palette index in `0..IRC_COLORS`, `None` for the default.
    pub fg_color: Option<u8>,
    /// Background palette index in `0..IRC_COLORS`, `None` for the default.
    pub bg_color: Option<u8>,
}

impl FormatState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Colors as they should be painted: `(foreground, background)` with
    /// `reverse` already applied.
    #[must_use]
    pub fn painted_colors(&self) -> (Option<u8>, Option<u8>) {
        if self.reverse { (self.bg_color, self.fg_color) } else { (self.fg_color, self.bg_color) }
    }

    /// Whether any attribute or color differs from the default.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Turn a decoded color code value into a stored palette index.
///
/// Values above 99 clamp to 99, and 99 means "default".
#[must_use]
pub fn color_index(code: u8) -> Option<u8> {
    let clamped = code.min(COLOR_CODE_MAX);
    (clamped < IRC_COLORS).then_some(clamped)
}
