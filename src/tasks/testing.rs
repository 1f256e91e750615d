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

//! Task sink that records submissions instead of running them.

use std::{cell::RefCell, path::PathBuf};

use anyhow::Result;

use crate::{
    picker::{ListingTicket, UploadTicket},
    tasks::{AppTask, TaskSink},
};

#[derive(Default)]
pub(crate) struct RecordingSink {
    tasks: RefCell<Vec<AppTask>>,
}

impl TaskSink for RecordingSink {
    fn submit(&self, task: AppTask) -> Result<()> {
        self.tasks.borrow_mut().push(task);
        Ok(())
    }
}

impl RecordingSink {
    pub(crate) fn count(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub(crate) fn listings(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|t| matches!(t, AppTask::LoadPage { .. }))
            .count()
    }

    /// Ticket, page and search text of the most recent listing request.
    pub(crate) fn last_listing(&self) -> (ListingTicket, u32, String) {
        self.tasks
            .borrow()
            .iter()
            .rev()
            .find_map(|task| match task {
                AppTask::LoadPage {
                    ticket,
                    page,
                    search,
                    ..
                } => Some((*ticket, *page, search.clone())),
                _ => None,
            })
            .expect("no listing was requested")
    }

    pub(crate) fn last_upload(&self) -> (UploadTicket, Vec<PathBuf>) {
        self.tasks
            .borrow()
            .iter()
            .rev()
            .find_map(|task| match task {
                AppTask::UploadFiles { ticket, files, .. } => Some((*ticket, files.clone())),
                _ => None,
            })
            .expect("no upload was requested")
    }
}
