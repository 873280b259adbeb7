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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Input not found")]
    InputNotFound,
    #[error("Invalid settings file")]
    InvalidSettings,
    #[error("Terminal unavailable")]
    TerminalUnavailable,
}

impl AppError {
    pub const INPUT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const INVALID_SETTINGS_EXIT_CODE: i32 = 21;
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound => Self::INPUT_NOT_FOUND_EXIT_CODE,
            Self::InvalidSettings => Self::INVALID_SETTINGS_EXIT_CODE,
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InputNotFound => "An input file does not exist or cannot be opened.",
            Self::InvalidSettings => {
                "The settings file could not be read or parsed. Fix it or pass `--config`."
            }
            Self::TerminalUnavailable => {
                "No interactive terminal available. Run ircview from a terminal emulator."
            }
        }
    }
}
