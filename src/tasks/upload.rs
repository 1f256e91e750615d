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

//! Upload batches.
//!
//! Files are uploaded one per request. With a single worker the batch runs
//! strictly in order; with more workers a bounded pool of scoped threads pulls
//! files from a shared index. Either way a failed upload is logged and
//! skipped. A batch always runs to the end, closing the picker only stops its
//! report from being posted.

use std::{
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use tracing::{info, warn};

use crate::{api::MediaApi, model::UploadReport};

pub(crate) struct UploadPool {
    workers: usize,
}

impl UploadPool {
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub(crate) fn run(&self, api: &dyn MediaApi, files: &[PathBuf]) -> UploadReport {
        let next = AtomicUsize::new(0);
        let attempted = AtomicUsize::new(0);
        let succeeded = AtomicUsize::new(0);

        let work = || {
            loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(path) = files.get(index) else {
                    break;
                };

                attempted.fetch_add(1, Ordering::Relaxed);

                match api.upload(path) {
                    Ok(file) => {
                        succeeded.fetch_add(1, Ordering::Relaxed);
                        let url = file.map(|f| f.url).unwrap_or_default();
                        info!(path = %path.display(), url, "uploaded");
                    }
                    Err(e) => warn!(path = %path.display(), "Upload failed: {}", e),
                }
            }
        };

        let workers = self.workers.min(files.len());
        if workers <= 1 {
            work();
        } else {
            thread::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(&work);
                }
            });
        }

        UploadReport {
            attempted: attempted.into_inner(),
            succeeded: succeeded.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, path::Path, sync::Mutex};

    use super::*;
    use crate::{
        api::ApiError,
        model::{MediaDescriptor, MediaPage},
        picker::SessionToken,
    };

    struct FakeApi {
        failing: HashSet<PathBuf>,
        uploaded: Mutex<Vec<PathBuf>>,
        cancel_after_first: Option<SessionToken>,
    }

    impl FakeApi {
        fn failing(names: &[&str]) -> Self {
            Self {
                failing: names.iter().map(PathBuf::from).collect(),
                uploaded: Mutex::new(vec![]),
                cancel_after_first: None,
            }
        }
    }

    impl MediaApi for FakeApi {
        fn list(&self, _page: u32, _search: &str) -> Result<MediaPage, ApiError> {
            Ok(MediaPage::default())
        }

        fn upload(&self, path: &Path) -> Result<Option<MediaDescriptor>, ApiError> {
            self.uploaded.lock().unwrap().push(path.to_path_buf());

            if let Some(token) = &self.cancel_after_first {
                token.cancel();
            }

            if self.failing.contains(path) {
                Err(ApiError::Rejected("No selected file".to_string()))
            } else {
                let name = path.display().to_string();
                Ok(Some(MediaDescriptor::new(format!("/uploads/media_library/{name}"), name)))
            }
        }
    }

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn failed_upload_does_not_stop_the_batch() {
        let api = FakeApi::failing(&["two.png"]);
        let batch = files(&["one.png", "two.png", "three.png"]);

        let report = UploadPool::new(1).run(&api, &batch);

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(*api.uploaded.lock().unwrap(), batch);
    }

    #[test]
    fn pooled_uploads_report_the_same_counts() {
        let api = FakeApi::failing(&["b.png", "e.png"]);
        let batch = files(&["a.png", "b.png", "c.png", "d.png", "e.png", "f.png"]);

        let report = UploadPool::new(3).run(&api, &batch);

        assert_eq!(report.attempted, 6);
        assert_eq!(report.succeeded, 4);

        let mut uploaded = api.uploaded.lock().unwrap().clone();
        uploaded.sort();
        assert_eq!(uploaded, batch);
    }

    #[test]
    fn closing_the_session_does_not_abort_the_batch() {
        let token = SessionToken::new(4);
        let api = FakeApi {
            cancel_after_first: Some(token.clone()),
            ..FakeApi::failing(&[])
        };
        let batch = files(&["1.png", "2.png", "3.png"]);

        let report = UploadPool::new(1).run(&api, &batch);

        assert!(token.is_cancelled());
        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 3);
        assert_eq!(*api.uploaded.lock().unwrap(), batch);
    }

    #[test]
    fn empty_batch_attempts_nothing() {
        let api = FakeApi::failing(&[]);

        let report = UploadPool::new(2).run(&api, &[]);

        assert_eq!(report, UploadReport::default());
    }
}
