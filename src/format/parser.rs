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

use super::Timestamp;
use super::state::{FormatState, color_index};
use super::transcode::{Latin1, Transcoder, decode_run};

pub const CODE_BOLD: u8 = 0x02;
pub const CODE_COLOR: u8 = 0x03;
pub const CODE_BELL: u8 = 0x07;
pub const CODE_HIDDEN: u8 = 0x08;
pub const CODE_RESET: u8 = 0x0F;
pub const CODE_REVERSE: u8 = 0x16;
pub const CODE_ITALIC: u8 = 0x1D;
pub const CODE_STRIKETHROUGH: u8 = 0x1E;
pub const CODE_UNDERLINE: u8 = 0x1F;

/// A maximal run of text sharing one formatting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub format: FormatState,
}

impl TextSegment {
    /// Length of the decoded text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the segment contributes display text.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.format.hidden && !self.text.is_empty()
    }
}

/// One parsed message, consumed by the writer right after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub segments: Vec<TextSegment>,
    pub timestamp: Option<Timestamp>,
}

impl FormattedMessage {
    /// Concatenated text of every visible segment.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.segments.iter().filter(|s| s.is_visible()).map(|s| s.text.as_str()).collect()
    }
}

/// Whether `byte` is one of the control codes the parser consumes.
#[must_use]
pub fn is_control_code(byte: u8) -> bool {
    matches!(
        byte,
        CODE_BOLD
            | CODE_COLOR
            | CODE_BELL
            | CODE_HIDDEN
            | CODE_RESET
            | CODE_REVERSE
            | CODE_ITALIC
            | CODE_STRIKETHROUGH
            | CODE_UNDERLINE
    )
}

/// Parse IRC-formatted bytes into styled segments.
///
/// Returns `None` for empty input. Invalid UTF-8 runs fall back to
/// ISO-8859-1.
#[must_use]
pub fn parse(text: &[u8], timestamp: Option<Timestamp>) -> Option<FormattedMessage> {
    parse_with(text, timestamp, &Latin1)
}

/// [`parse`] with a caller-supplied transcoder for non-UTF-8 runs.
#[must_use]
pub fn parse_with(
    text: &[u8],
    timestamp: Option<Timestamp>,
    transcoder: &dyn Transcoder,
) -> Option<FormattedMessage> {
    if text.is_empty() {
        return None;
    }

    let mut scanner = Scanner { text, transcoder, segments: Vec::new(), run_start: 0 };
    let mut state = FormatState::default();
    let mut pos = 0;

    while pos < text.len() {
        let byte = text[pos];
        if !is_control_code(byte) {
            pos += 1;
            continue;
        }

        scanner.flush(pos, state);
        pos += 1;
        match byte {
            CODE_BOLD => state.bold = !state.bold,
            CODE_ITALIC => state.italic = !state.italic,
            CODE_UNDERLINE => state.underline = !state.underline,
            CODE_STRIKETHROUGH => state.strikethrough = !state.strikethrough,
            CODE_REVERSE => state.reverse = !state.reverse,
            CODE_HIDDEN => state.hidden = !state.hidden,
            CODE_RESET => state.reset(),
            CODE_COLOR => pos = apply_color_code(text, pos, &mut state),
            // CODE_BELL: the run is split but nothing is emitted or changed.
            _ => {}
        }
        scanner.run_start = pos;
    }
    scanner.flush(text.len(), state);

    Some(FormattedMessage { segments: scanner.segments, timestamp })
}

struct Scanner<'a> {
    text: &'a [u8],
    transcoder: &'a dyn Transcoder,
    segments: Vec<TextSegment>,
    run_start: usize,
}

impl Scanner<'_> {
    /// Emit `run_start..end` with the state that was in effect for it.
    fn flush(&mut self, end: usize, state: FormatState) {
        if end <= self.run_start {
            return;
        }
        let text = decode_run(&self.text[self.run_start..end], self.transcoder);
        self.segments.push(TextSegment { text, format: state });
    }
}

/// Read the arguments of a color code starting at `pos` (just past the code
/// byte) and update `state`. Returns the position after the arguments.
fn apply_color_code(text: &[u8], pos: usize, state: &mut FormatState) -> usize {
    let (fg, mut pos) = read_color_digits(text, pos);
    let mut bg = None;
    if text.get(pos) == Some(&b',') {
        let (digits, after) = read_color_digits(text, pos + 1);
        bg = digits;
        pos = after;
    }

    match (fg, bg) {
        (None, None) => {
            state.fg_color = None;
            state.bg_color = None;
        }
        (fg, bg) => {
            if let Some(code) = fg {
                state.fg_color = color_index(code);
            }
            if let Some(code) = bg {
                state.bg_color = color_index(code);
            }
        }
    }
    pos
}

/// Up to two ASCII digits. `None` when there are none.
fn read_color_digits(text: &[u8], start: usize) -> (Option<u8>, usize) {
    let mut value: u8 = 0;
    let mut pos = start;
    while pos < text.len() && pos - start < 2 && text[pos].is_ascii_digit() {
        value = value * 10 + (text[pos] - b'0');
        pos += 1;
    }
    if pos == start { (None, pos) } else { (Some(value), pos) }
}
