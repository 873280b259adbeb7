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

//! Line readers feeding the event loop.
//!
//! Each input runs on its own local task and sends raw line bytes; decoding
//! happens in the parser.

use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Line { source: usize, bytes: Vec<u8> },
    Closed { source: usize, error: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    File(PathBuf),
    Stdin,
}

impl SourceInput {
    /// Short name for the status bar.
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => path.display().to_string(),
            },
            Self::Stdin => "stdin".to_owned(),
        }
    }
}

/// Split `left<TAB>right` at the first tab.
pub fn split_indent(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let tab = line.iter().position(|&b| b == b'\t')?;
    Some((&line[..tab], &line[tab + 1..]))
}

fn trim_line_end(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}

/// Read `input` on a local task. With `follow` set, a file is polled at that
/// interval after reaching its end instead of closing.
pub fn spawn(
    source: usize,
    input: SourceInput,
    follow: Option<Duration>,
    tx: mpsc::UnboundedSender<SourceEvent>,
) {
    tokio::task::spawn_local(async move {
        let result = match &input {
            SourceInput::File(path) => match tokio::fs::File::open(path).await {
                Ok(file) => pump(source, BufReader::new(file), follow, &tx).await,
                Err(err) => Err(err),
            },
            SourceInput::Stdin => pump(source, BufReader::new(tokio::io::stdin()), None, &tx).await,
        };
        let error = match result {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(source, input = ?input, "source failed: {err}");
                Some(err.to_string())
            }
        };
        let _ = tx.send(SourceEvent::Closed { source, error });
    });
}

/// Forward every line of `reader` until it ends (or, when following, until
/// the receiver goes away). A partial last line is held back while
/// following and sent as-is otherwise.
pub async fn pump<R: AsyncBufRead + Unpin>(
    source: usize,
    mut reader: R,
    follow: Option<Duration>,
    tx: &mpsc::UnboundedSender<SourceEvent>,
) -> std::io::Result<()> {
    let mut line = Vec::new();
    loop {
        let read = reader.read_until(b'\n', &mut line).await?;
        let complete = line.last() == Some(&b'\n');
        if read == 0 || !complete {
            if let Some(interval) = follow {
                if tx.is_closed() {
                    return Ok(());
                }
                tokio::time::sleep(interval).await;
                continue;
            }
            if line.is_empty() {
                return Ok(());
            }
        }

        let bytes = trim_line_end(&line).to_vec();
        line.clear();
        if tx.send(SourceEvent::Line { source, bytes }).is_err() {
            return Ok(());
        }
    }
}
