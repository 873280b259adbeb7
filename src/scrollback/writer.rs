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

//! Turns parsed messages into styled lines.
//!
//! For every visible segment the text is inserted, then link spans are
//! tagged, then attributes, then colors. Links go first so the other tags
//! layer on top of them.

use super::store::StyledLine;
use super::tags::Tag;
use crate::format::{FormattedMessage, TextSegment, Timestamp};
use crate::url::UrlMatcher;

/// Separator between the left and right region of an indented line.
pub const INDENT_SEPARATOR: &str = " ";

/// Renders the timestamp prefix of a line.
pub trait StampFormatter {
    fn format(&self, stamp: &Timestamp) -> String;
}

/// `[HH:MM:SS] ` in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl StampFormatter for LocalClock {
    fn format(&self, stamp: &Timestamp) -> String {
        stamp.with_timezone(&chrono::Local).format("[%H:%M:%S] ").to_string()
    }
}

/// `[HH:MM:SS] ` in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl StampFormatter for UtcClock {
    fn format(&self, stamp: &Timestamp) -> String {
        stamp.format("[%H:%M:%S] ").to_string()
    }
}

/// Collaborators the writer needs for one append.
pub struct WriteContext<'a> {
    pub matcher: &'a UrlMatcher,
    pub stamps: &'a dyn StampFormatter,
    /// Whether a message timestamp produces a prefix.
    pub time_stamp: bool,
}

/// Build the line for a single-region append.
#[must_use]
pub fn compose_line(message: &FormattedMessage, ctx: &WriteContext<'_>) -> StyledLine {
    let mut line = StyledLine::default();
    write_message(&mut line, message, ctx);
    line
}

/// Build the line for an indented append. The separator is only written
/// when both regions are present.
#[must_use]
pub fn compose_indent(
    left: Option<&FormattedMessage>,
    right: Option<&FormattedMessage>,
    ctx: &WriteContext<'_>,
) -> StyledLine {
    let mut line = StyledLine::default();
    if let Some(left) = left {
        write_message(&mut line, left, ctx);
        if right.is_some() {
            line.push_str(INDENT_SEPARATOR);
        }
    }
    if let Some(right) = right {
        write_message(&mut line, right, ctx);
    }
    line
}

fn write_message(line: &mut StyledLine, message: &FormattedMessage, ctx: &WriteContext<'_>) {
    if ctx.time_stamp
        && let Some(stamp) = message.timestamp.as_ref()
    {
        let prefix = ctx.stamps.format(stamp);
        let (start, end) = line.push_str(&prefix);
        line.apply_tag(Tag::Stamp, start, end);
    }

    for segment in message.segments.iter().filter(|s| s.is_visible()) {
        write_segment(line, segment, ctx.matcher);
    }
}

fn write_segment(line: &mut StyledLine, segment: &TextSegment, matcher: &UrlMatcher) {
    let (start, end) = line.push_str(&segment.text);

    for url in matcher.find(&segment.text) {
        line.apply_tag(Tag::Url, start + url.start, start + url.end);
    }

    let format = &segment.format;
    for (enabled, tag) in [
        (format.bold, Tag::Bold),
        (format.italic, Tag::Italic),
        (format.underline, Tag::Underline),
        (format.strikethrough, Tag::Strikethrough),
    ] {
        if enabled {
            line.apply_tag(tag, start, end);
        }
    }

    let (fg, bg) = format.painted_colors();
    if let Some(index) = fg {
        line.apply_tag(Tag::Foreground(index), start, end);
    }
    if let Some(index) = bg {
        line.apply_tag(Tag::Background(index), start, end);
    }
}
