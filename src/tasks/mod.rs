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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload network calls
//! to the media library from the main UI thread. It provides a dedicated
//! worker loop that translates [`AppTask`] requests into API calls and
//! broadcasts the results back to the application via [`AppEvent`]s.
//!
//! Every task carries the [`SessionToken`] of the picker session that issued
//! it. A listing for a closed session is skipped. An upload batch always runs
//! to the end, but its report is only posted while the session is open.

mod handlers;
#[cfg(test)]
pub(crate) mod testing;
pub(crate) mod upload;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::{
    api::MediaApi,
    config::AppConfig,
    events::AppEvent,
    picker::{ListingTicket, SessionToken, UploadTicket},
};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadPage {
        ticket: ListingTicket,
        token: SessionToken,
        page: u32,
        search: String,
    },

    UploadFiles {
        ticket: UploadTicket,
        token: SessionToken,
        files: Vec<PathBuf>,
    },
}

/// Destination for tasks issued by the picker.
pub(crate) trait TaskSink {
    fn submit(&self, task: AppTask) -> Result<()>;
}

impl TaskSink for Sender<AppTask> {
    fn submit(&self, task: AppTask) -> Result<()> {
        self.send(task).context("Task worker is no longer running")
    }
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the API client and handles tasks strictly in the order
/// they were submitted.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `api` - The media library client.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    api: Box<dyn MediaApi>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let upload_workers = config.upload_workers();

    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let ctx = TaskContext {
                api: api.as_ref(),
                event_tx: &event_tx,
                upload_workers,
            };

            if let Err(e) = handle_task(task, &ctx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }

        debug!("task channel closed, worker exiting");
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    pub(crate) api: &'a dyn MediaApi,
    pub(crate) event_tx: &'a Sender<AppEvent>,
    pub(crate) upload_workers: usize,
}

/// Orchestrates the execution of a single task.
pub(crate) fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    match task {
        AppTask::LoadPage {
            ticket,
            token,
            page,
            search,
        } => handlers::load_page(ctx, ticket, &token, page, &search),

        AppTask::UploadFiles {
            ticket,
            token,
            files,
        } => handlers::upload_files(ctx, ticket, &token, &files),
    }
}
