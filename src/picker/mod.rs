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

//! Media picker state machine.
//!
//! This module owns everything the media picker knows: whether it is open and
//! on which tab, the loaded listing, the page cursor, the selection and the
//! callback that receives the committed selection. It performs no I/O and
//! draws nothing; network work is handed to a [`TaskSink`] as [`AppTask`]s
//! and the results come back through [`MediaPicker::on_page_loaded`] and
//! [`MediaPicker::on_uploads_finished`].
//!
//! # Lifecycle
//!
//! ```text
//! Closed -> Library <-> Upload -> Uploading -> Library
//!   ^__________ close / commit ____________|
//! ```
//!
//! Each open starts a new [`SessionToken`]. Closing cancels it, and results
//! carrying a ticket from any other session or a superseded request are
//! dropped without touching state.

mod cursor;
mod selection;
mod session;

pub(crate) use cursor::{FIRST_PAGE, PageCursor};
pub(crate) use selection::SelectionSet;
pub(crate) use session::{ListingTicket, SessionToken, UploadTicket};

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    model::{MediaDescriptor, MediaPage, UploadReport},
    tasks::{AppTask, TaskSink},
};

/// Receives the committed selection, at most once per open.
pub(crate) type SelectionCallback = Box<dyn FnOnce(Vec<MediaDescriptor>) + Send>;

/// Everything the picker needs for one open, supplied in full each time.
pub(crate) struct PickerConfig {
    pub(crate) allow_multiple: bool,
    pub(crate) on_commit: SelectionCallback,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum PickerMode {
    Closed,
    Library,
    Upload,
    Uploading,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum PickerTab {
    Library,
    Upload,
}

#[derive(Debug, Clone, Copy)]
struct PendingListing {
    ticket: ListingTicket,
    page: u32,
    reset: bool,
}

pub(crate) struct MediaPicker {
    mode: PickerMode,
    allow_multiple: bool,
    on_commit: Option<SelectionCallback>,

    selection: SelectionSet,
    cursor: PageCursor,

    items: Vec<MediaDescriptor>,
    total_count: Option<usize>,
    load_error: Option<String>,
    last_upload: Option<UploadReport>,

    session: SessionToken,
    session_count: u64,
    request_count: u64,
    pending: Option<PendingListing>,
    upload_batch: Option<UploadTicket>,
    reload_requested: bool,
}

impl MediaPicker {
    pub(crate) fn new() -> Self {
        Self {
            mode: PickerMode::Closed,
            allow_multiple: false,
            on_commit: None,
            selection: SelectionSet::new(),
            cursor: PageCursor::default(),
            items: vec![],
            total_count: None,
            load_error: None,
            last_upload: None,
            session: SessionToken::inactive(),
            session_count: 0,
            request_count: 0,
            pending: None,
            upload_batch: None,
            reload_requested: false,
        }
    }

    pub(crate) fn mode(&self) -> PickerMode {
        self.mode
    }

    pub(crate) fn is_open(&self) -> bool {
        self.mode != PickerMode::Closed
    }

    pub(crate) fn tab(&self) -> Option<PickerTab> {
        match self.mode {
            PickerMode::Closed => None,
            PickerMode::Library => Some(PickerTab::Library),
            PickerMode::Upload | PickerMode::Uploading => Some(PickerTab::Upload),
        }
    }

    pub(crate) fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub(crate) fn items(&self) -> &[MediaDescriptor] {
        &self.items
    }

    pub(crate) fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub(crate) fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub(crate) fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub(crate) fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub(crate) fn last_upload(&self) -> Option<UploadReport> {
        self.last_upload
    }

    pub(crate) fn is_uploading(&self) -> bool {
        self.upload_batch.is_some()
    }

    /// The insert affordance is only enabled with something selected.
    pub(crate) fn can_insert(&self) -> bool {
        !self.selection.is_empty()
    }

    pub(crate) fn insert_label(&self) -> String {
        match self.selection.len() {
            0 => "Insert".to_string(),
            n => format!("Insert ({n})"),
        }
    }

    /// Opens the picker with a fresh configuration, selection and cursor, and
    /// requests the first page of the unfiltered listing.
    pub(crate) fn open(&mut self, config: PickerConfig, tasks: &dyn TaskSink) -> Result<()> {
        self.session.cancel();
        self.session_count += 1;
        self.session = SessionToken::new(self.session_count);

        self.allow_multiple = config.allow_multiple;
        self.on_commit = Some(config.on_commit);

        self.selection.clear();
        self.cursor.reset();
        self.items.clear();
        self.total_count = None;
        self.load_error = None;
        self.last_upload = None;
        self.pending = None;
        self.upload_batch = None;
        self.reload_requested = false;

        self.mode = PickerMode::Library;

        info!(
            session = self.session.id(),
            multiple = self.allow_multiple,
            "media picker opened"
        );

        self.load_page(FIRST_PAGE, true, tasks)?;

        Ok(())
    }

    /// Hides the picker. Selection and cursor are kept until the next open.
    pub(crate) fn close(&mut self) {
        if !self.is_open() {
            return;
        }

        self.mode = PickerMode::Closed;
        self.session.cancel();

        info!(session = self.session.id(), "media picker closed");
    }

    pub(crate) fn set_tab(&mut self, tab: PickerTab) {
        self.mode = match (self.mode, tab) {
            (PickerMode::Closed, _) | (PickerMode::Uploading, _) => return,
            (_, PickerTab::Library) => PickerMode::Library,
            (_, PickerTab::Upload) => PickerMode::Upload,
        };
    }

    /// Requests `page` of the listing for the current search text.
    ///
    /// Only one listing request is in flight at a time, a call made while one
    /// is pending is dropped and `false` is returned.
    pub(crate) fn load_page(&mut self, page: u32, reset: bool, tasks: &dyn TaskSink) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }

        if self.cursor.is_loading {
            debug!(page, "listing already in flight, dropping request");
            return Ok(false);
        }

        let page = page.max(FIRST_PAGE);

        self.request_count += 1;
        let ticket = ListingTicket {
            session: self.session.id(),
            request: self.request_count,
        };

        tasks.submit(AppTask::LoadPage {
            ticket,
            token: self.session.clone(),
            page,
            search: self.cursor.search_text.clone(),
        })?;

        self.cursor.is_loading = true;
        self.pending = Some(PendingListing {
            ticket,
            page,
            reset,
        });

        Ok(true)
    }

    pub(crate) fn load_next_page(&mut self, tasks: &dyn TaskSink) -> Result<bool> {
        match self.cursor.next_page() {
            Some(page) => self.load_page(page, false, tasks),
            None => Ok(false),
        }
    }

    pub(crate) fn on_search_text_changed(&mut self, text: &str, tasks: &dyn TaskSink) -> Result<bool> {
        if !self.is_open() {
            return Ok(false);
        }

        self.cursor.search_text = text.to_string();
        self.cursor.page_number = FIRST_PAGE;

        // The listing in flight belongs to the old text, reload once it lands.
        if self.cursor.is_loading {
            self.reload_requested = true;
            return Ok(false);
        }

        self.load_page(FIRST_PAGE, true, tasks)
    }

    /// Applies the outcome of a listing request.
    ///
    /// Returns `true` if the result was applied, `false` if it was stale.
    pub(crate) fn on_page_loaded(
        &mut self,
        ticket: ListingTicket,
        result: Result<MediaPage, String>,
        tasks: &dyn TaskSink,
    ) -> Result<bool> {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket && self.is_open() => pending,
            _ => {
                debug!(?ticket, "ignoring stale listing");
                return Ok(false);
            }
        };

        self.pending = None;
        self.cursor.is_loading = false;

        if self.reload_requested {
            self.reload_requested = false;
            self.load_page(FIRST_PAGE, true, tasks)?;
            return Ok(false);
        }

        match result {
            Ok(page) => {
                if pending.reset {
                    self.items = page.files;
                } else {
                    self.items.extend(page.files);
                }

                self.cursor.page_number = pending.page;
                self.cursor.has_next_page = page.has_next;
                self.total_count = page.total_count;
                self.load_error = None;
            }
            Err(message) => {
                warn!(page = pending.page, "Error loading media: {}", message);

                if pending.reset {
                    self.items.clear();
                    self.cursor.has_next_page = false;
                }

                self.load_error = Some(message);
            }
        }

        Ok(true)
    }

    /// Adds or removes `item` according to the selection mode.
    ///
    /// Returns `true` if the item is selected afterwards.
    pub(crate) fn toggle_selection(&mut self, item: MediaDescriptor) -> bool {
        if !self.is_open() {
            return false;
        }

        if self.allow_multiple {
            self.selection.toggle(item)
        } else {
            self.selection.replace(item);
            true
        }
    }

    /// Starts uploading `files`, one request per file.
    pub(crate) fn upload_files(&mut self, files: Vec<PathBuf>, tasks: &dyn TaskSink) -> Result<bool> {
        if !self.is_open() || self.is_uploading() || files.is_empty() {
            return Ok(false);
        }

        self.request_count += 1;
        let ticket = UploadTicket {
            session: self.session.id(),
            batch: self.request_count,
        };

        info!(files = files.len(), "starting upload batch");

        tasks.submit(AppTask::UploadFiles {
            ticket,
            token: self.session.clone(),
            files,
        })?;

        self.upload_batch = Some(ticket);
        self.mode = PickerMode::Uploading;

        Ok(true)
    }

    /// Finishes an upload batch: back to the library and a full reload of
    /// the first page, which is the only way uploaded files appear.
    pub(crate) fn on_uploads_finished(
        &mut self,
        ticket: UploadTicket,
        report: UploadReport,
        tasks: &dyn TaskSink,
    ) -> Result<bool> {
        if self.upload_batch != Some(ticket) || !self.is_open() {
            debug!(?ticket, "ignoring stale upload report");
            return Ok(false);
        }

        self.upload_batch = None;
        self.last_upload = Some(report);
        self.mode = PickerMode::Library;

        if self.cursor.is_loading {
            self.reload_requested = true;
        } else {
            self.load_page(FIRST_PAGE, true, tasks)?;
        }

        Ok(true)
    }

    /// Hands the current selection, possibly empty, to the callback and
    /// closes the picker.
    pub(crate) fn commit_selection(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }

        let items = self.selection.items().to_vec();
        info!(count = items.len(), "committing selection");

        if let Some(on_commit) = self.on_commit.take() {
            on_commit(items);
        }

        self.close();

        true
    }
}
