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

use crate::format::IRC_COLORS;
use crate::palette::{PaletteProvider, Rgb, SystemColor};

/// Palette entry used for links.
const URL_COLOR: usize = 12;
/// Palette entry used for the timestamp prefix.
const STAMP_COLOR: usize = 14;

/// A style applied to a character range of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Url,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Foreground(u8),
    Background(u8),
    Stamp,
}

/// `tag` applied to characters `start..end` of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    pub start: usize,
    pub end: usize,
    pub tag: Tag,
}

impl TagSpan {
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Concrete look of a tag, or of several tags layered together.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl TextStyle {
    /// Layer `other` on top: its colors win, flags accumulate.
    #[must_use]
    pub fn patch(self, other: Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }
}

/// Styles for every tag, resolved once from a palette.
///
/// A view builds one table and every buffer it displays shares it; buffers
/// only store [`Tag`]s.
#[derive(Debug, Clone)]
pub struct TagTable {
    foreground: Vec<TextStyle>,
    background: Vec<TextStyle>,
    url: TextStyle,
    stamp: TextStyle,
    base: TextStyle,
}

impl TagTable {
    pub fn new(palette: &dyn PaletteProvider) -> Self {
        let foreground = (0..usize::from(IRC_COLORS))
            .map(|i| TextStyle { fg: palette.color(i), ..TextStyle::default() })
            .collect();
        let background = (0..usize::from(IRC_COLORS))
            .map(|i| TextStyle { bg: palette.color(i), ..TextStyle::default() })
            .collect();
        Self {
            foreground,
            background,
            url: TextStyle {
                fg: palette.color(URL_COLOR),
                underline: true,
                ..TextStyle::default()
            },
            stamp: TextStyle { fg: palette.color(STAMP_COLOR), ..TextStyle::default() },
            base: TextStyle {
                fg: palette.system(SystemColor::Foreground),
                bg: palette.system(SystemColor::Background),
                ..TextStyle::default()
            },
        }
    }

    /// Style of untagged text.
    #[must_use]
    pub fn base(&self) -> TextStyle {
        self.base
    }

    #[must_use]
    pub fn style(&self, tag: Tag) -> TextStyle {
        match tag {
            Tag::Url => self.url,
            Tag::Bold => TextStyle { bold: true, ..TextStyle::default() },
            Tag::Italic => TextStyle { italic: true, ..TextStyle::default() },
            Tag::Underline => TextStyle { underline: true, ..TextStyle::default() },
            Tag::Strikethrough => TextStyle { strikethrough: true, ..TextStyle::default() },
            Tag::Foreground(i) => {
                self.foreground.get(usize::from(i)).copied().unwrap_or_default()
            }
            Tag::Background(i) => {
                self.background.get(usize::from(i)).copied().unwrap_or_default()
            }
            Tag::Stamp => self.stamp,
        }
    }

    /// Layer the styles of `tags` in application order, without the base.
    #[must_use]
    pub fn resolve<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> TextStyle {
        tags.into_iter().fold(TextStyle::default(), |acc, tag| acc.patch(self.style(*tag)))
    }
}
