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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker results
//! (media listings, upload batches), and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state,
//!    hands network work to the task worker, and routes keys to the picker
//!    modal, the command line or the host screen.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!    `ratatui` terminal, so the screen always reflects the latest picker
//!    state.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stderr;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    model::{MediaDescriptor, MediaPage, UploadReport},
    picker::{ListingTicket, UploadTicket},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    OpenPicker { allow_multiple: bool },
    ClosePicker,
    CommitSelection,
    UploadPaths(String),

    PageLoaded {
        ticket: ListingTicket,
        result: Result<MediaPage, String>,
    },
    UploadsFinished {
        ticket: UploadTicket,
        report: UploadReport,
    },

    SelectionCommitted {
        items: Vec<MediaDescriptor>,
        allow_multiple: bool,
    },
    ClearInserted,

    Tick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        dispatch_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

pub(crate) fn dispatch_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::OpenPicker { allow_multiple } => handle_open_picker(app, allow_multiple)?,
        AppEvent::ClosePicker => handle_close_picker(app),
        AppEvent::CommitSelection => handle_commit_selection(app),
        AppEvent::UploadPaths(paths) => handle_upload_paths(app, &paths)?,
        AppEvent::PageLoaded { ticket, result } => handle_page_loaded(app, ticket, result)?,
        AppEvent::UploadsFinished { ticket, report } => {
            handle_uploads_finished(app, ticket, report)?
        }
        AppEvent::SelectionCommitted {
            items,
            allow_multiple,
        } => handle_selection_committed(app, items, allow_multiple),
        AppEvent::ClearInserted => handle_clear_inserted(app),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick | AppEvent::ExitApplication => {}
    }

    Ok(())
}
