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

//! Recovery for text runs that are not valid UTF-8.
//!
//! IRC carries whatever bytes the sender's client produced. Older clients
//! still send ISO-8859-1 or CP1252, so a run that fails UTF-8 validation is
//! handed to a [`Transcoder`] instead of being dropped.

/// Converts a byte run that failed UTF-8 validation into displayable text.
///
/// Returning `None` makes the run contribute an empty string; the rest of the
/// message is unaffected.
pub trait Transcoder {
    fn transcode(&self, bytes: &[u8]) -> Option<String>;
}

/// ISO-8859-1 fallback. Every byte maps to the code point of the same value,
/// so this never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl Transcoder for Latin1 {
    fn transcode(&self, bytes: &[u8]) -> Option<String> {
        Some(bytes.iter().copied().map(char::from).collect())
    }
}

/// Decode one text run: UTF-8 when valid, otherwise the transcoder, otherwise
/// an empty string.
pub(crate) fn decode_run(bytes: &[u8], transcoder: &dyn Transcoder) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(err) => {
            tracing::trace!(
                valid_up_to = err.valid_up_to(),
                len = bytes.len(),
                "text run is not UTF-8, transcoding"
            );
            transcoder.transcode(bytes).unwrap_or_default()
        }
    }
}
