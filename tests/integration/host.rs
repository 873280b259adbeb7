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
// TESTS: 9
// =====
//
// The terminal host: source events, keys, mouse and rendering together.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ircview::app::{SourceEvent, handle_source_event_at, handle_terminal_event};
use ircview::scroll::ScrollState;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::helpers::{draw, ms, screen_row, send_line, test_app, test_terminal};

fn press(app: &mut ircview::app::App, code: KeyCode, modifiers: KeyModifiers) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, modifiers)));
}

fn click(app: &mut ircview::app::App, column: u16, row: u16) {
    let mouse = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    handle_terminal_event(app, Event::Mouse(mouse));
}

fn attached_lines(app: &ircview::app::App) -> Vec<String> {
    app.view
        .attached_buffer()
        .map(|b| b.store().lines().map(|l| l.text().to_owned()).collect())
        .unwrap_or_default()
}

// --- Rendering ---

#[test]
fn newest_lines_fill_the_bottom_of_the_screen() {
    let t0 = Instant::now();
    let mut app = test_app(&["#rust.log"], t0);
    let mut terminal = test_terminal(40, 10);
    for i in 0..30 {
        send_line(&mut app, 0, format!("line {i}").as_bytes(), t0);
    }
    draw(&mut terminal, &mut app);

    assert_eq!(screen_row(&terminal, 0), "line 21");
    assert_eq!(screen_row(&terminal, 8), "line 29");
    let status = screen_row(&terminal, 9);
    assert!(status.contains("#rust.log"), "status was {status:?}");
    assert!(status.contains("[backlog]"), "status was {status:?}");
    assert!(status.contains("30 lines"), "status was {status:?}");
}

#[test]
fn long_lines_wrap_at_spaces() {
    let t0 = Instant::now();
    let mut app = test_app(&["#rust.log"], t0);
    let mut terminal = test_terminal(20, 4);
    send_line(&mut app, 0, b"aaaa bbbb cccc dddd eeee", t0);
    draw(&mut terminal, &mut app);

    assert_eq!(screen_row(&terminal, 0), "aaaa bbbb cccc dddd");
    assert_eq!(screen_row(&terminal, 1), "eeee");
}

// --- Scrolling ---

#[test]
fn paging_up_stops_following_and_end_resumes() {
    let t0 = Instant::now();
    let mut app = test_app(&["#rust.log"], t0);
    let mut terminal = test_terminal(40, 10);
    for i in 0..30 {
        send_line(&mut app, 0, format!("line {i}").as_bytes(), t0);
    }
    draw(&mut terminal, &mut app);
    app.view.poll(t0 + ms(1100));
    draw(&mut terminal, &mut app);
    let state = app.view.attached_buffer().map(|b| b.scroll_state());
    assert_eq!(state, Some(ScrollState::AtBottom));

    press(&mut app, KeyCode::PageUp, KeyModifiers::NONE);
    draw(&mut terminal, &mut app);
    assert_eq!(screen_row(&terminal, 0), "line 13");
    let state = app.view.attached_buffer().map(|b| b.scroll_state());
    assert_eq!(state, Some(ScrollState::Scrolled));

    send_line(&mut app, 0, b"line 30", t0 + ms(1200));
    draw(&mut terminal, &mut app);
    assert_eq!(screen_row(&terminal, 0), "line 13", "reading position is kept");

    press(&mut app, KeyCode::End, KeyModifiers::NONE);
    draw(&mut terminal, &mut app);
    assert_eq!(screen_row(&terminal, 8), "line 30");
    let state = app.view.attached_buffer().map(|b| b.scroll_state());
    assert_eq!(state, Some(ScrollState::AtBottom));
}

// --- Sources and buffers ---

#[test]
fn lines_are_routed_to_their_source_buffer() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log", "b.log"], t0);
    send_line(&mut app, 0, b"\x02first\x02 file", t0);
    send_line(&mut app, 1, b"<bob>\thello", t0);
    send_line(&mut app, 5, b"nowhere", t0);

    assert_eq!(attached_lines(&app), vec!["first file"]);
    press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(app.view.attached(), app.buffer_for(1));
    assert_eq!(attached_lines(&app), vec!["<bob> hello"]);
}

#[test]
fn tab_and_backtab_cycle_through_buffers() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log", "b.log", "c.log"], t0);
    assert_eq!(app.attached_source().map(|s| s.label.as_str()), Some("a.log"));

    press(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(app.attached_source().map(|s| s.label.as_str()), Some("c.log"));
    press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
    press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
    assert_eq!(app.attached_source().map(|s| s.label.as_str()), Some("b.log"));
}

#[test]
fn closed_sources_leave_a_notice() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log", "b.log"], t0);
    let mut terminal = test_terminal(60, 5);

    handle_source_event_at(&mut app, SourceEvent::Closed { source: 0, error: None }, t0);
    assert!(app.sources[0].closed);
    assert_eq!(app.notice.as_deref(), Some("a.log: end of input"));

    let failed = SourceEvent::Closed { source: 1, error: Some("permission denied".to_owned()) };
    handle_source_event_at(&mut app, failed, t0);
    draw(&mut terminal, &mut app);
    assert!(screen_row(&terminal, 4).contains("b.log: permission denied"));
}

// --- Keys and mouse ---

#[test]
fn ctrl_l_clears_and_t_toggles_timestamps() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log"], t0);
    send_line(&mut app, 0, b"one", t0);
    send_line(&mut app, 0, b"two", t0);

    press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
    assert!(attached_lines(&app).is_empty());

    press(&mut app, KeyCode::Char('t'), KeyModifiers::NONE);
    assert_eq!(app.view.attached_buffer().map(|b| b.time_stamp()), Some(true));
    assert_eq!(app.notice.as_deref(), Some("timestamps on"));
    send_line(&mut app, 0, b"three", t0);
    let line = attached_lines(&app).pop().unwrap_or_default();
    assert!(line.starts_with('[') && line.ends_with("] three"), "line was {line:?}");
}

#[test]
fn clicking_a_link_hands_it_to_the_handler() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log"], t0);
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&opened);
    app.view.set_url_handler(move |url| sink.borrow_mut().push(url.to_owned()));
    let mut terminal = test_terminal(40, 5);

    send_line(&mut app, 0, b"see https://example.com now", t0);
    draw(&mut terminal, &mut app);

    click(&mut app, 1, 0);
    assert!(opened.borrow().is_empty());
    click(&mut app, 6, 0);
    assert_eq!(*opened.borrow(), vec!["https://example.com".to_owned()]);
}

#[test]
fn q_and_ctrl_c_quit() {
    let t0 = Instant::now();
    let mut app = test_app(&["a.log"], t0);
    press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
    assert!(app.should_quit);

    let mut app = test_app(&["a.log"], t0);
    press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}
