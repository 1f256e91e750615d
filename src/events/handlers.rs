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
use tracing::{info, warn};

use crate::{
    App,
    components::PickerAction,
    events::AppEvent,
    model::{MediaDescriptor, MediaPage, UploadReport},
    picker::{ListingTicket, PickerConfig, PickerTab, UploadTicket},
    util::files::expand_upload_paths,
};

pub(super) fn handle_open_picker(app: &mut App, allow_multiple: bool) -> Result<()> {
    let event_tx = app.event_tx.clone();
    let config = PickerConfig {
        allow_multiple,
        on_commit: Box::new(move |items| {
            let _ = event_tx.send(AppEvent::SelectionCommitted {
                items,
                allow_multiple,
            });
        }),
    };

    app.picker_view.reset();
    app.status = None;
    app.picker.open(config, &app.task_tx)
}

pub(super) fn handle_close_picker(app: &mut App) {
    app.picker.close();
}

pub(super) fn handle_commit_selection(app: &mut App) {
    if !app.picker.commit_selection() {
        app.status = Some("The media picker is not open".to_string());
    }
}

pub(super) fn handle_upload_paths(app: &mut App, paths: &str) -> Result<()> {
    if !app.picker.is_open() {
        app.status = Some("Open the media picker before uploading".to_string());
        return Ok(());
    }

    let files = expand_upload_paths(paths);
    if files.is_empty() {
        warn!(paths, "no uploadable files found");
        app.status = Some(format!("No uploadable images found in {}", paths));
        return Ok(());
    }

    app.picker.set_tab(PickerTab::Upload);
    if !app.picker.upload_files(files, &app.task_tx)? {
        app.status = Some("An upload is already in progress".to_string());
    }

    Ok(())
}

pub(super) fn handle_page_loaded(
    app: &mut App,
    ticket: ListingTicket,
    result: Result<MediaPage, String>,
) -> Result<()> {
    if app.picker.on_page_loaded(ticket, result, &app.task_tx)? {
        app.picker_view.sync_highlight(app.picker.items().len());
    }

    Ok(())
}

pub(super) fn handle_uploads_finished(
    app: &mut App,
    ticket: UploadTicket,
    report: UploadReport,
) -> Result<()> {
    if app.picker.on_uploads_finished(ticket, report, &app.task_tx)? {
        app.picker_view.table_state.select(None);
        app.status = Some(format!(
            "Uploaded {} of {} file(s)",
            report.succeeded, report.attempted
        ));
    }

    Ok(())
}

/// Receives the selection committed by the picker.
///
/// A single-select commit replaces what was inserted before, a multi-select
/// commit adds the media that are not there yet.
pub(super) fn handle_selection_committed(
    app: &mut App,
    items: Vec<MediaDescriptor>,
    allow_multiple: bool,
) {
    if items.is_empty() {
        app.status = Some("Nothing was selected".to_string());
        return;
    }

    info!(count = items.len(), "inserting media");

    if allow_multiple {
        for item in items {
            if !app.inserted.iter().any(|i| i.same_asset(&item)) {
                app.inserted.push(item);
            }
        }
    } else {
        app.inserted = items;
    }

    app.status = None;
}

pub(super) fn handle_clear_inserted(app: &mut App) {
    app.inserted.clear();
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.status = Some(message);
}

/// Applies an action reported by the picker widget.
pub(super) fn handle_picker_action(app: &mut App, action: PickerAction) -> Result<()> {
    match action {
        PickerAction::Close => handle_close_picker(app),
        PickerAction::Commit => handle_commit_selection(app),
        PickerAction::Toggle(item) => {
            app.picker.toggle_selection(item);
        }
        PickerAction::SearchChanged(text) => {
            app.picker_view.table_state.select(None);
            app.picker.on_search_text_changed(&text, &app.task_tx)?;
        }
        PickerAction::NextPage => {
            app.picker.load_next_page(&app.task_tx)?;
        }
        PickerAction::Upload(paths) => handle_upload_paths(app, &paths)?,
        PickerAction::SwitchTab(tab) => app.picker.set_tab(tab),
    }

    Ok(())
}
