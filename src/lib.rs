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

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod palette;
pub mod perf;
pub mod scroll;
pub mod scrollback;
pub mod ui;
pub mod url;
pub mod view;

pub use view::{TextView, ViewSettings};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ircview", version, about = "Styled, scrollable IRC history in the terminal")]
pub struct Cli {
    /// Files of IRC-formatted lines, one buffer each (stdin when omitted)
    pub paths: Vec<std::path::PathBuf>,

    /// Keep reading files as they grow
    #[arg(long, short)]
    pub follow: bool,

    /// Scrollback limit per buffer (0 or less for unbounded)
    #[arg(long, allow_negative_numbers = true)]
    pub max_lines: Option<i64>,

    /// Do not prefix lines with the time they arrived
    #[arg(long)]
    pub no_timestamps: bool,

    /// Truncate long lines instead of wrapping them
    #[arg(long)]
    pub no_wrap: bool,

    /// Settings file (defaults to <config dir>/ircview/settings.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<std::path::PathBuf>,

    /// Write tracing diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,

    /// Write frame timings as JSON lines (requires the `perf` feature)
    #[arg(long, value_name = "PATH")]
    pub perf_log: Option<std::path::PathBuf>,

    /// Append to the perf log instead of truncating it
    #[arg(long)]
    pub perf_append: bool,
}
