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

// =====
// TESTS: 8
// =====
//
// Control-code parsing and link matching through the public API.

use ircview::format::{is_control_code, parse, strip_codes};
use ircview::url::{UrlMatcher, UrlPattern};
use pretty_assertions::assert_eq;

fn joined_segments(input: &[u8]) -> String {
    parse(input, None)
        .map(|m| m.segments.iter().map(|s| s.text.as_str()).collect())
        .unwrap_or_default()
}

fn without_control_bytes(input: &[u8]) -> String {
    let kept: Vec<u8> = input.iter().copied().filter(|&b| !is_control_code(b)).collect();
    String::from_utf8(kept).expect("test inputs are UTF-8 apart from codes")
}

// --- Round trip ---

#[test]
fn segments_concatenate_to_input_without_codes() {
    let inputs: [&[u8]; 6] = [
        b"plain text",
        b"\x02bold\x02 and \x1ditalic\x1d",
        b"\x1funder\x0f reset \x1estrike",
        b"ding\x07dong",
        "\x16rev\x16 ünïcödé".as_bytes(),
        b"\x02\x1d\x1f\x1e\x16\x0f",
    ];
    for input in inputs {
        assert_eq!(joined_segments(input), without_control_bytes(input), "input {input:?}");
    }
}

#[test]
fn color_digits_are_consumed_with_the_code() {
    assert_eq!(joined_segments(b"\x034,12red on blue\x03 done"), "red on blue done");
    assert_eq!(strip_codes(b"\x0399x\x03,5y"), "xy");
}

#[test]
fn hidden_text_is_parsed_but_not_visible() {
    let msg = parse(b"pass: \x08hunter2\x08!", None).expect("parses");
    assert_eq!(msg.plain_text(), "pass: !");
    assert_eq!(strip_codes(b"pass: \x08hunter2\x08!"), "pass: hunter2!");
}

// --- Formatting examples ---

#[test]
fn bold_toggle_examples() {
    let twice = parse(b"\x02\x02text", None).expect("parses");
    assert_eq!(twice.segments.len(), 1);
    assert_eq!(twice.segments[0].text, "text");
    assert!(!twice.segments[0].format.bold);

    let once = parse(b"\x02text", None).expect("parses");
    assert!(once.segments[0].format.bold);
}

#[test]
fn color_examples() {
    let fg = parse(b"\x034text", None).expect("parses");
    assert_eq!((fg.segments[0].format.fg_color, fg.segments[0].format.bg_color), (Some(4), None));

    let both = parse(b"\x034,12text", None).expect("parses");
    assert_eq!(
        (both.segments[0].format.fg_color, both.segments[0].format.bg_color),
        (Some(4), Some(12))
    );

    let reset = parse(b"\x034,12a\x03text", None).expect("parses");
    assert_eq!(
        (reset.segments[1].format.fg_color, reset.segments[1].format.bg_color),
        (None, None)
    );
}

#[test]
fn latin1_and_utf8_mix_in_one_line() {
    let msg = parse(b"caf\xe9 \x02\xc3\xbcber", None).expect("parses");
    let texts: Vec<_> = msg.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["café ", "über"]);
    assert!(msg.segments[1].format.bold);
}

// --- Links ---

#[test]
fn overlapping_links_keep_the_higher_priority() {
    // [0,10) at priority 1 against [5,15) at priority 2
    let matcher = UrlMatcher::new(&[
        UrlPattern::new("fffff.+", 2),
        UrlPattern::new("aaaaafffff", 1),
    ]);
    let found = matcher.find("aaaaafffffbbbbb");
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].start, found[0].end), (0, 10));
    assert_eq!(found[0].priority, 1);
}

#[test]
fn default_patterns_find_urls_emails_and_channels() {
    let matcher = UrlMatcher::default();
    let found = matcher.find("see https://example.com/a?b=1, mail bob@example.org in #rust.");
    let texts: Vec<_> = found.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["https://example.com/a?b=1", "bob@example.org", "#rust"]);
}
