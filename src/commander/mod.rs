// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching a corresponding
//! application event when typing is finished and a command is submitted.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::events::AppEvent;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a key event, returning `true` if the commander consumed it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if let Some(app_event) = parse_command(&buffer) {
                    event_tx.send(app_event)?;
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

fn parse_command(buffer: &str) -> Option<AppEvent> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        [] => return None,

        ["q"] | ["quit"] => AppEvent::ExitApplication,

        ["open"] => AppEvent::OpenPicker { allow_multiple: false },
        ["open", "multi"] => AppEvent::OpenPicker { allow_multiple: true },
        ["close"] => AppEvent::ClosePicker,
        ["insert"] => AppEvent::CommitSelection,

        ["upload", paths @ ..] if !paths.is_empty() => AppEvent::UploadPaths(paths.join(" ")),

        ["clear"] => AppEvent::ClearInserted,

        [cmd, ..] => AppEvent::Error(format!("Unknown command: {}", cmd)),
    };

    Some(event)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn commands_map_to_events() {
        assert!(matches!(
            parse_command("open"),
            Some(AppEvent::OpenPicker { allow_multiple: false })
        ));
        assert!(matches!(
            parse_command("open multi"),
            Some(AppEvent::OpenPicker { allow_multiple: true })
        ));
        assert!(matches!(parse_command("insert"), Some(AppEvent::CommitSelection)));
        assert!(matches!(
            parse_command("upload ./a.png  ./banners"),
            Some(AppEvent::UploadPaths(paths)) if paths == "./a.png ./banners"
        ));
        assert!(matches!(parse_command("upload"), Some(AppEvent::Error(_))));
        assert!(matches!(parse_command("frobnicate"), Some(AppEvent::Error(_))));
        assert!(parse_command("   ").is_none());
    }

    #[test]
    fn typed_command_is_sent_on_enter() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('q')), &event_tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &event_tx).unwrap());
        assert!(commander.active());

        for c in "close".chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &event_tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), &event_tx).unwrap();

        assert!(!commander.active());
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::ClosePicker)));
    }

    #[test]
    fn escape_abandons_the_command() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &event_tx).unwrap();
        commander.handle_event(&key(KeyCode::Char('q')), &event_tx).unwrap();
        commander.handle_event(&key(KeyCode::Esc), &event_tx).unwrap();

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert!(event_rx.try_recv().is_err());
    }
}
