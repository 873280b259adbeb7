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

mod events;
mod keys;
pub mod source;
mod state;

pub use events::{handle_source_event, handle_source_event_at, handle_terminal_event};
pub use source::{SourceEvent, SourceInput};
pub use state::{App, SourceBuffer};

use crate::Cli;
use crate::config::Settings;
use crate::error::AppError;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_TICK: Duration = Duration::from_millis(250);
/// Source lines handled per frame so a large file cannot stall input.
const MAX_LINES_PER_FRAME: usize = 4096;

fn inputs(cli: &Cli) -> Vec<SourceInput> {
    if cli.paths.is_empty() {
        vec![SourceInput::Stdin]
    } else {
        cli.paths.iter().cloned().map(SourceInput::File).collect()
    }
}

/// Build the app from settings and flags. Fails when the settings file is
/// unusable or an input file does not exist.
pub fn create_app(cli: &Cli) -> anyhow::Result<App> {
    let mut settings = Settings::resolve(cli.config.as_deref()).map_err(|err| {
        tracing::error!("{err}");
        anyhow::Error::new(AppError::InvalidSettings).context(err.to_string())
    })?;
    settings.apply_cli(cli);

    for path in &cli.paths {
        if !path.is_file() {
            return Err(anyhow::Error::new(AppError::InputNotFound)
                .context(format!("{} is not a readable file", path.display())));
        }
    }

    let labels = inputs(cli).iter().map(SourceInput::label).collect();
    let mut app = App::new(&settings, labels, cli.follow, Instant::now());
    app.view.set_url_handler(open_link);
    if let Some(path) = cli.perf_log.as_deref() {
        app.perf = crate::perf::Profiler::open(path, cli.perf_append);
    }
    Ok(app)
}

/// Hand a clicked link to the desktop. Channel names have nowhere to go.
fn open_link(link: &str) {
    let target = if link.contains("://") {
        link.to_owned()
    } else if link.contains('@') {
        format!("mailto:{link}")
    } else {
        tracing::debug!(link, "not an openable link");
        return;
    };
    if let Err(err) = open::that(&target) {
        tracing::warn!(link = %target, "failed to open link: {err}");
    }
}

/// Start one reader per input. Must run inside a `LocalSet`.
pub fn start_sources(app: &App, cli: &Cli) {
    let follow = cli.follow.then_some(app.follow_poll);
    for (index, input) in inputs(cli).into_iter().enumerate() {
        source::spawn(index, input, follow, app.event_tx.clone());
    }
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|err| {
        anyhow::Error::new(AppError::TerminalUnavailable).context(err.to_string())
    })?;
    // Mouse capture is best-effort; some terminals reject it
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let result = event_loop(app, &mut terminal).await;

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    result
}

async fn event_loop(app: &mut App, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
    let mut events = EventStream::new();

    loop {
        // Phase 1: wait for an event, the next scheduled task or the idle tick
        let wake = app
            .view
            .next_deadline()
            .map_or(IDLE_TICK, |at| at.saturating_duration_since(Instant::now()).min(IDLE_TICK));
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                handle_source_event(app, event);
            }
            () = tokio::time::sleep(wake) => {}
        }

        // Phase 2: drain what is already queued, terminal events first
        let mut lines = 0;
        loop {
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_terminal_event(app, event);
                continue;
            }
            if lines >= MAX_LINES_PER_FRAME {
                break;
            }
            match app.event_rx.try_recv() {
                Ok(event) => {
                    handle_source_event(app, event);
                    lines += 1;
                }
                Err(_) => break,
            }
        }

        if app.should_quit {
            return Ok(());
        }

        // Phase 3: run due viewport work, then draw if anything changed
        app.view.poll(Instant::now());
        if app.view.viewport_mut().take_dirty() {
            if let Some(perf) = app.perf.as_mut() {
                perf.end_frame();
            }
            terminal.draw(|f| crate::ui::render(f, app))?;
        }
    }
}
