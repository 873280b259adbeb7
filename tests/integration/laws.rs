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

//! Property-based invariants that must hold for any input:
//!
//! 1. Segment texts of one parse concatenate to the input with every
//!    control code (and its color digits) removed.
//! 2. A bounded buffer never holds more than `max_lines` lines; an unbounded
//!    one keeps every non-empty append.
//! 3. Link matches are pairwise disjoint, sorted by start and point at the
//!    text they carry.

use ircview::ViewSettings;
use ircview::format::{CODE_COLOR, is_control_code, parse};
use ircview::url::{UrlMatcher, UrlPattern};
use proptest::prelude::*;
use std::time::Instant;

use crate::helpers::line_view;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Bytes weighted toward the interesting cases: control codes, color
/// arguments and bytes that break UTF-8.
fn irc_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        4 => any::<u8>(),
        3 => prop::sample::select(vec![0x02u8, 0x03, 0x07, 0x08, 0x0f, 0x16, 0x1d, 0x1e, 0x1f]),
        3 => prop::sample::select(b"0123456789,".to_vec()),
        2 => prop::sample::select(vec![0xc3u8, 0xa9, 0xe9, 0xff, 0x80]),
        2 => prop::sample::select(b"ab :/#".to_vec()),
    ]
}

fn irc_line() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(irc_byte(), 0..120)
}

fn decode(run: &[u8]) -> String {
    match std::str::from_utf8(run) {
        Ok(text) => text.to_owned(),
        Err(_) => run.iter().map(|&b| char::from(b)).collect(),
    }
}

fn skip_digits(input: &[u8], mut pos: usize) -> usize {
    let start = pos;
    while pos < input.len() && pos - start < 2 && input[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Reference model: drop every control code and color argument, decoding
/// each run between codes on its own.
fn strip_reference(input: &[u8]) -> String {
    let mut out = String::new();
    let mut run_start = 0;
    let mut pos = 0;
    while pos < input.len() {
        let byte = input[pos];
        if !is_control_code(byte) {
            pos += 1;
            continue;
        }
        out.push_str(&decode(&input[run_start..pos]));
        pos += 1;
        if byte == CODE_COLOR {
            pos = skip_digits(input, pos);
            if input.get(pos) == Some(&b',') {
                pos = skip_digits(input, pos + 1);
            }
        }
        run_start = pos;
    }
    out.push_str(&decode(&input[run_start..]));
    out
}

fn pattern_set() -> impl Strategy<Value = Vec<UrlPattern>> {
    let pool = vec![
        "a+b",
        "b+",
        "ab|ba",
        "#[a-z]+",
        "[a-z]+://[a-z/]*",
        "x.",
        ":[^ ]+",
        "(unclosed",
    ];
    prop::collection::vec((prop::sample::select(pool), -3i32..6), 0..6).prop_map(|picks| {
        picks.into_iter().map(|(pattern, priority)| UrlPattern::new(pattern, priority)).collect()
    })
}

fn link_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select("abx #:/é".chars().collect::<Vec<_>>()), 0..60)
        .prop_map(|chars| chars.into_iter().collect())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Parse round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_partition_the_stripped_input(input in irc_line()) {
        let joined: String = parse(&input, None)
            .map(|m| m.segments.iter().map(|s| s.text.as_str()).collect())
            .unwrap_or_default();
        prop_assert_eq!(joined, strip_reference(&input), "input {:?}", input);
    }
}

proptest! {
    #[test]
    fn segments_are_never_empty_and_colors_stay_in_range(input in irc_line()) {
        for segment in parse(&input, None).map(|m| m.segments).unwrap_or_default() {
            prop_assert!(!segment.text.is_empty());
            prop_assert!(segment.format.fg_color.is_none_or(|c| c < 99));
            prop_assert!(segment.format.bg_color.is_none_or(|c| c < 99));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Scrollback bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn line_count_respects_the_limit(
        max_lines in 0usize..12,
        appends in prop::collection::vec(irc_line(), 0..60),
    ) {
        let settings = ViewSettings { max_lines, time_stamps: false, ..ViewSettings::default() };
        let mut view = line_view(settings);
        let now = Instant::now();
        let id = view.buffer_new_at("#chan", now);

        let mut kept = 0usize;
        for line in &appends {
            view.append(id, line, None, now);
            if !line.is_empty() {
                kept += 1;
            }
            let buffer = view.buffer(id).expect("live buffer");
            prop_assert_eq!(buffer.num_lines(), buffer.store().len());
            if max_lines > 0 {
                prop_assert_eq!(buffer.num_lines(), kept.min(max_lines));
            } else {
                prop_assert_eq!(buffer.num_lines(), kept);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Link matches
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matches_are_sorted_disjoint_and_faithful(
        patterns in pattern_set(),
        text in link_text(),
    ) {
        let matcher = UrlMatcher::new(&patterns);
        let found = matcher.find(&text);

        for pair in found.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start, "unsorted: {:?}", found);
        }
        for (i, a) in found.iter().enumerate() {
            for b in &found[i + 1..] {
                prop_assert!(!a.overlaps(b), "overlap: {:?} and {:?}", a, b);
            }
            let slice: String = text.chars().skip(a.start).take(a.end - a.start).collect();
            prop_assert_eq!(&slice, &a.text);
        }
    }
}
