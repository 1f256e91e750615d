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

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    events::AppEvent,
    picker::{ListingTicket, SessionToken, UploadTicket},
    tasks::{TaskContext, upload::UploadPool},
};

pub(super) fn load_page(
    ctx: &TaskContext,
    ticket: ListingTicket,
    token: &SessionToken,
    page: u32,
    search: &str,
) -> Result<()> {
    if token.is_cancelled() {
        debug!(session = token.id(), page, "skipping listing for closed session");
        return Ok(());
    }

    let result = ctx.api.list(page, search).map_err(|e| {
        warn!(page, search, "Error loading media: {}", e);
        e.to_string()
    });

    if token.is_cancelled() {
        debug!(session = token.id(), page, "discarding listing for closed session");
        return Ok(());
    }

    ctx.event_tx.send(AppEvent::PageLoaded { ticket, result })?;

    Ok(())
}

pub(super) fn upload_files(
    ctx: &TaskContext,
    ticket: UploadTicket,
    token: &SessionToken,
    files: &[PathBuf],
) -> Result<()> {
    let report = UploadPool::new(ctx.upload_workers).run(ctx.api, files);

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        "upload batch finished"
    );

    if token.is_cancelled() {
        debug!(session = token.id(), "picker closed, not posting upload report");
        return Ok(());
    }

    ctx.event_tx.send(AppEvent::UploadsFinished { ticket, report })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        path::Path,
        sync::{Mutex, mpsc},
    };

    use super::*;
    use crate::{
        api::{ApiError, MediaApi},
        model::{MediaDescriptor, MediaPage},
    };

    struct CountingApi {
        lists: Mutex<usize>,
        uploads: Mutex<usize>,
    }

    impl CountingApi {
        fn new() -> Self {
            Self {
                lists: Mutex::new(0),
                uploads: Mutex::new(0),
            }
        }
    }

    impl MediaApi for CountingApi {
        fn list(&self, page: u32, _search: &str) -> Result<MediaPage, ApiError> {
            *self.lists.lock().unwrap() += 1;
            Ok(MediaPage {
                files: vec![MediaDescriptor::new(format!("/u/{page}.png"), "p.png")],
                has_next: false,
                ..MediaPage::default()
            })
        }

        fn upload(&self, _path: &Path) -> Result<Option<MediaDescriptor>, ApiError> {
            *self.uploads.lock().unwrap() += 1;
            Ok(None)
        }
    }

    #[test]
    fn listing_result_is_posted_for_live_session() {
        let api = CountingApi::new();
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext { api: &api, event_tx: &event_tx, upload_workers: 1 };
        let ticket = ListingTicket { session: 1, request: 1 };

        load_page(&ctx, ticket, &SessionToken::new(1), 1, "").unwrap();

        match event_rx.try_recv() {
            Ok(AppEvent::PageLoaded { ticket: t, result }) => {
                assert_eq!(t, ticket);
                assert_eq!(result.unwrap().files.len(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn cancelled_session_makes_no_request() {
        let api = CountingApi::new();
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext { api: &api, event_tx: &event_tx, upload_workers: 1 };
        let token = SessionToken::new(3);
        token.cancel();

        load_page(&ctx, ListingTicket { session: 3, request: 1 }, &token, 1, "").unwrap();

        assert_eq!(*api.lists.lock().unwrap(), 0);
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn upload_batch_posts_report() {
        let api = CountingApi::new();
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext { api: &api, event_tx: &event_tx, upload_workers: 1 };
        let ticket = UploadTicket { session: 1, batch: 2 };
        let files = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];

        upload_files(&ctx, ticket, &SessionToken::new(1), &files).unwrap();

        match event_rx.try_recv() {
            Ok(AppEvent::UploadsFinished { report, .. }) => {
                assert_eq!(report.attempted, 2);
                assert_eq!(report.succeeded, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn closed_session_still_uploads_every_file_without_reporting() {
        let api = CountingApi::new();
        let (event_tx, event_rx) = mpsc::channel();
        let ctx = TaskContext { api: &api, event_tx: &event_tx, upload_workers: 1 };
        let token = SessionToken::new(5);
        token.cancel();
        let files = vec![PathBuf::from("1.png"), PathBuf::from("2.png"), PathBuf::from("3.png")];

        upload_files(&ctx, UploadTicket { session: 5, batch: 1 }, &token, &files).unwrap();

        assert_eq!(*api.uploads.lock().unwrap(), 3);
        assert!(event_rx.try_recv().is_err());
    }
}
