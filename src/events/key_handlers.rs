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

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{App, events::AppEvent};

use super::handlers::handle_picker_action;

/// Maps keyboard input to application actions.
///
/// Keys are offered in turn to:
///
/// * **The picker inputs**: While the search or upload input of an open
///   picker has focus, every key is text for that input.
/// * **The commander**: `:` starts a command, which then receives all keys
///   until it is submitted or abandoned.
/// * **The picker**: Navigation, selection and insert keys of the open modal.
/// * **The host screen**: Opening the picker, clearing inserted media and
///   quitting.
///
/// # Errors
///
/// Returns an error if an event or task cannot be sent to its channel.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.event_tx.send(AppEvent::ExitApplication)?;
        return Ok(());
    }

    let event = Event::Key(key);

    if app.picker.is_open() && app.picker_view.is_editing(&app.picker) {
        return process_picker_key(app, &event);
    }

    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if app.picker.is_open() {
        return process_picker_key(app, &event);
    }

    process_global_key_event(app, key)
}

fn process_picker_key(app: &mut App, event: &Event) -> Result<()> {
    if let Some(action) = app.picker_view.process_event(event, &app.picker) {
        handle_picker_action(app, action)?;
    }

    Ok(())
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('o') => app.event_tx.send(AppEvent::OpenPicker {
            allow_multiple: false,
        })?,
        KeyCode::Char('O') => app.event_tx.send(AppEvent::OpenPicker {
            allow_multiple: true,
        })?,

        KeyCode::Char('c') => app.event_tx.send(AppEvent::ClearInserted)?,

        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::{
        config::AppConfig,
        events::dispatch_event,
        model::{MediaDescriptor, MediaPage},
        tasks::AppTask,
    };

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        (App::new(AppConfig::default(), task_tx), task_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        process_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn pump(app: &mut App) {
        while let Ok(event) = app.event_rx.try_recv() {
            dispatch_event(app, event).unwrap();
        }
    }

    #[test]
    fn host_keys_open_the_picker() {
        let (mut app, task_rx) = app();

        press(&mut app, KeyCode::Char('O'));
        pump(&mut app);

        assert!(app.picker.is_open());
        assert!(app.picker.allow_multiple());
        assert!(matches!(task_rx.try_recv(), Ok(AppTask::LoadPage { page: 1, .. })));
    }

    #[test]
    fn typing_a_search_requests_a_filtered_listing() {
        let (mut app, task_rx) = app();

        press(&mut app, KeyCode::Char('o'));
        pump(&mut app);

        let ticket = match task_rx.try_recv() {
            Ok(AppTask::LoadPage { ticket, .. }) => ticket,
            other => panic!("expected a listing, got {other:?}"),
        };
        let page = MediaPage {
            files: vec![MediaDescriptor::new("/uploads/a.png", "a.png")],
            ..MediaPage::default()
        };
        dispatch_event(&mut app, AppEvent::PageLoaded { ticket, result: Ok(page) }).unwrap();

        press(&mut app, KeyCode::Char('/'));
        // 'q' is text here, not quit
        press(&mut app, KeyCode::Char('q'));
        pump(&mut app);

        match task_rx.try_recv() {
            Ok(AppTask::LoadPage { page, search, .. }) => {
                assert_eq!(page, 1);
                assert_eq!(search, "q");
            }
            other => panic!("expected a search listing, got {other:?}"),
        }
        assert!(app.picker.is_open());
    }

    #[test]
    fn escape_closes_the_picker() {
        let (mut app, _task_rx) = app();

        press(&mut app, KeyCode::Char('o'));
        pump(&mut app);
        press(&mut app, KeyCode::Esc);

        assert!(!app.picker.is_open());
    }

    #[test]
    fn ctrl_c_always_exits() {
        let (mut app, _task_rx) = app();

        process_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }
}
