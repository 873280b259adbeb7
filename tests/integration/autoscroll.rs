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
// TESTS: 7
// =====
//
// Auto-follow behavior across appends, user scrolls and buffer switches.

use ircview::ViewSettings;
use ircview::scroll::{ScrollSource, ScrollState};
use pretty_assertions::assert_eq;
use std::time::Instant;

use crate::helpers::{line_view, ms};

fn settings() -> ViewSettings {
    ViewSettings { max_lines: 0, time_stamps: false, ..ViewSettings::default() }
}

#[test]
fn backlog_burst_ends_at_bottom() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let id = view.buffer_new_at("#chan", t0);
    view.buffer_show(id, true, t0);

    for i in 0..50u64 {
        // the display lays out each line but leaves the page at the top
        let vp = view.viewport_mut();
        vp.extent += 1.0;
        vp.offset = 0.0;
        view.append(id, format!("history {i}").as_bytes(), None, t0 + ms(i * 4));
    }
    assert!(!view.viewport().at_bottom());

    view.poll(t0 + ms(196 + 30));
    assert!(view.viewport().at_bottom());
    assert!(view.buffer(id).expect("live").loading_backlog());
}

#[test]
fn half_a_page_up_is_not_followed() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let id = view.buffer_new_at("#chan", t0);
    view.buffer_show(id, true, t0);
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1000));

    // 0.5 pages from the bottom
    view.viewport_mut().offset = 70.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1100));
    view.poll(t0 + ms(1200));
    assert_eq!(view.buffer(id).expect("live").scroll_state(), ScrollState::Scrolled);

    view.viewport_mut().extent = 101.0;
    view.append(id, b"new message", None, t0 + ms(1300));
    view.poll(t0 + ms(2000));
    assert!((view.viewport().offset - 70.0).abs() < f64::EPSILON);
    assert_eq!(view.next_deadline(), None);
}

#[test]
fn returning_to_the_bottom_resumes_following() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let id = view.buffer_new_at("#chan", t0);
    view.buffer_show(id, true, t0);
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1000));

    view.viewport_mut().offset = 10.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1100));
    view.viewport_mut().offset = 79.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1110));
    view.poll(t0 + ms(1140));
    assert_eq!(view.buffer(id).expect("live").scroll_state(), ScrollState::AtBottom);

    view.viewport_mut().extent = 101.0;
    view.append(id, b"new message", None, t0 + ms(1200));
    view.poll(t0 + ms(1230));
    assert!(view.viewport().at_bottom());
}

#[test]
fn view_moves_never_change_state() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let id = view.buffer_new_at("#chan", t0);
    view.buffer_show(id, true, t0);
    view.viewport_mut().extent = 100.0;

    view.viewport_mut().offset = 0.0;
    view.on_scroll(ScrollSource::Programmatic, t0 + ms(10));
    assert!(view.buffer(id).expect("live").loading_backlog());
}

#[test]
fn switching_back_restores_the_reading_position() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let a = view.buffer_new_at("#a", t0);
    let b = view.buffer_new_at("#b", t0);
    view.buffer_show(a, true, t0);
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1000));

    view.viewport_mut().offset = 40.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1100));
    view.poll(t0 + ms(1130));

    view.buffer_show(b, true, t0 + ms(1200));
    view.viewport_mut().extent = 30.0;
    view.poll(t0 + ms(1230));
    assert!(view.viewport().at_bottom(), "b never left the bottom");

    view.buffer_show(a, true, t0 + ms(1300));
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1330));
    assert!((view.viewport().offset - 40.0).abs() < f64::EPSILON);
    assert_eq!(view.buffer(a).expect("live").scroll_state(), ScrollState::Scrolled);
}

#[test]
fn line_arriving_during_switch_does_not_snap_the_reader() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let a = view.buffer_new_at("#a", t0);
    let b = view.buffer_new_at("#b", t0);
    view.buffer_show(a, true, t0);
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1000));

    view.viewport_mut().offset = 40.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1100));
    view.poll(t0 + ms(1130));

    view.buffer_show(b, true, t0 + ms(1200));
    view.viewport_mut().extent = 30.0;
    view.poll(t0 + ms(1230));
    assert!(view.viewport().at_bottom());

    // b's bottom is still on screen when a's next line lands
    view.buffer_show(a, true, t0 + ms(1300));
    view.append(a, b"tailed line", None, t0 + ms(1310));
    view.viewport_mut().extent = 101.0;
    view.poll(t0 + ms(1340));

    assert!((view.viewport().offset - 40.5).abs() < f64::EPSILON);
    assert_eq!(view.buffer(a).expect("live").scroll_state(), ScrollState::Scrolled);
}

#[test]
fn restore_falls_back_to_fraction_when_content_grew() {
    let mut view = line_view(settings());
    let t0 = Instant::now();
    let a = view.buffer_new_at("#a", t0);
    let b = view.buffer_new_at("#b", t0);
    view.buffer_show(a, true, t0);
    view.viewport_mut().extent = 100.0;
    view.poll(t0 + ms(1000));

    // halfway: offset 40 of max 80
    view.viewport_mut().offset = 40.0;
    view.on_scroll(ScrollSource::User, t0 + ms(1100));
    view.poll(t0 + ms(1130));
    view.buffer_show(b, true, t0 + ms(1200));

    view.buffer_show(a, true, t0 + ms(1300));
    view.viewport_mut().extent = 180.0;
    view.poll(t0 + ms(1330));
    assert!((view.viewport().offset - 80.0).abs() < f64::EPSILON);
}
