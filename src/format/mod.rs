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

//! IRC control-code parsing.
//!
//! Raw message bytes go in, a [`FormattedMessage`] of styled [`TextSegment`]s
//! comes out. Parsing never fails: malformed codes degrade, undecodable
//! runs become empty.

mod parser;
mod state;
mod transcode;

pub use parser::{
    CODE_BELL, CODE_BOLD, CODE_COLOR, CODE_HIDDEN, CODE_ITALIC, CODE_RESET, CODE_REVERSE,
    CODE_STRIKETHROUGH, CODE_UNDERLINE, FormattedMessage, TextSegment, is_control_code, parse,
    parse_with,
};
pub use state::{FormatState, IRC_COLORS, color_index};
pub use transcode::{Latin1, Transcoder};

/// Wall-clock time attached to a message.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Strip every control code (and color arguments) from `text`, decoding the
/// remainder the same way [`parse`] does. Hidden runs are kept.
#[must_use]
pub fn strip_codes(text: &[u8]) -> String {
    parse(text, None)
        .map(|msg| msg.segments.into_iter().map(|s| s.text).collect())
        .unwrap_or_default()
}
