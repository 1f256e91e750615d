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

//! # Media Picker TUI.
//!
//! A terminal front-end for choosing media from a remote media library, with
//! search, pagination, single or multiple selection and file uploads.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, the picker state and
//!   UI rendering.
//! * **Background Workers** talk to the media library over HTTP, listing
//!   pages and uploading files, via asynchronous task processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.
//!
//! The interface is drawn on standard error. The urls of the inserted media
//! are written to standard output on exit, one per line, so the picker can be
//! used inside a pipeline.

mod api;
mod commander;
mod components;
mod config;
mod events;
mod model;
mod picker;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stderr, Write},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{error, info};

use crate::{
    api::HttpMediaApi,
    commander::Commander,
    components::PickerView,
    config::AppConfig,
    events::{AppEvent, process_events},
    model::MediaDescriptor,
    picker::MediaPicker,
    tasks::{AppTask, spawn_task_worker},
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub picker: MediaPicker,
    pub picker_view: PickerView,

    pub commander: Commander,

    /// Media committed by the picker, in insertion order.
    pub inserted: Vec<MediaDescriptor>,
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            picker: MediaPicker::new(),
            picker_view: PickerView::new(),
            commander: Commander::new(),
            inserted: Vec::new(),
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the media library client, initializes the application
/// state, manages the terminal lifecycle, and finally prints the inserted
/// media urls.
fn main() -> Result<()> {
    let config = config::load_config();

    let log_path = config.log_path();
    if let Err(e) = util::log::init_logging(&log_path) {
        eprintln!("Logging disabled, {:#}", e);
    }

    info!(server = %config.server_url, "starting");

    let api = HttpMediaApi::new(&config).context("Failed to create media library client")?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, Box::new(api), task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        error!("Application error: {:#}", e);
    }
    res.context("Application error occurred")?;

    print_inserted(&app.inserted)
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<Stderr>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stderr);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process asynchronous [`AppTask`]s against the media
///   library.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    app: &mut App,
    api: Box<HttpMediaApi>,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    spawn_task_worker(&app.config, api, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read()
                && key.kind == KeyEventKind::Press
                && tx_keys.send(AppEvent::Key(key)).is_err()
            {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}

/// Writes the url of every inserted media item to standard output.
fn print_inserted(inserted: &[MediaDescriptor]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for item in inserted {
        writeln!(stdout, "{}", item.url).context("Failed to write inserted media")?;
    }

    Ok(())
}
