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

//! Settings file and command-line overrides.
//!
//! The file is optional JSON; every field falls back to its default, and
//! flags given on the command line win over the file.

use crate::Cli;
use crate::palette::{Palette, Rgb};
use crate::scroll::{DEFAULT_BACKLOG_TIMEOUT, DEFAULT_BOTTOM_THRESHOLD};
use crate::url::{UrlPattern, default_patterns};
use crate::view::{DEFAULT_DEBOUNCE, DEFAULT_MAX_LINES, ViewSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_FOLLOW_POLL_MS: u64 = 250;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scrollback limit per buffer. Zero or negative means unbounded.
    pub max_lines: i64,
    pub time_stamps: bool,
    pub word_wrap: bool,
    pub bottom_threshold: f64,
    pub debounce_ms: u64,
    pub backlog_timeout_ms: u64,
    /// How often a followed file is re-read once it reached its end.
    pub follow_poll_ms: u64,
    /// Palette entries to replace, keyed by index.
    pub palette: BTreeMap<usize, Rgb>,
    /// Link patterns added after the built-in ones.
    pub url_patterns: Vec<UrlPattern>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_lines: i64::try_from(DEFAULT_MAX_LINES).unwrap_or(i64::MAX),
            time_stamps: true,
            word_wrap: true,
            bottom_threshold: DEFAULT_BOTTOM_THRESHOLD,
            debounce_ms: millis(DEFAULT_DEBOUNCE),
            backlog_timeout_ms: millis(DEFAULT_BACKLOG_TIMEOUT),
            follow_poll_ms: DEFAULT_FOLLOW_POLL_MS,
            palette: BTreeMap::new(),
            url_patterns: Vec::new(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// `<config dir>/ircview/settings.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ircview").join("settings.json"))
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read { path: path.to_owned(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| SettingsError::Parse { path: path.to_owned(), source })
    }

    /// Load an explicitly requested file, or the default location if it
    /// exists. A missing default file yields the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(max_lines) = cli.max_lines {
            self.max_lines = max_lines;
        }
        if cli.no_timestamps {
            self.time_stamps = false;
        }
        if cli.no_wrap {
            self.word_wrap = false;
        }
    }

    pub fn follow_poll(&self) -> Duration {
        Duration::from_millis(self.follow_poll_ms.max(1))
    }

    pub fn view_settings(&self) -> ViewSettings {
        let mut palette = Palette::default();
        for (&index, &rgb) in &self.palette {
            palette.set(index, rgb);
        }
        let mut url_patterns = default_patterns();
        url_patterns.extend(self.url_patterns.iter().cloned());

        ViewSettings {
            max_lines: usize::try_from(self.max_lines).unwrap_or(0),
            time_stamps: self.time_stamps,
            word_wrap: self.word_wrap,
            bottom_threshold: self.bottom_threshold,
            debounce: Duration::from_millis(self.debounce_ms),
            backlog_timeout: Duration::from_millis(self.backlog_timeout_ms),
            palette,
            url_patterns,
        }
    }
}
