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

//! Response bodies of the upload endpoint.
//!
//! Listing responses decode straight into [`crate::model::MediaPage`].

use serde::Deserialize;

use crate::{api::ApiError, model::MediaDescriptor};

/// `{ "success": true, "file": { "url": .., "name": .. } }` on success,
/// `{ "error": ".." }` otherwise.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UploadResponse {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default)]
    pub(super) file: Option<MediaDescriptor>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

impl UploadResponse {
    /// Decodes a response body. A body that is not the expected JSON counts
    /// as an unsuccessful upload without a message.
    pub(super) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub(super) fn into_result(self) -> Result<Option<MediaDescriptor>, ApiError> {
        if self.success {
            Ok(self.file)
        } else {
            Err(ApiError::Rejected(
                self.error
                    .unwrap_or_else(|| "upload was not accepted".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaPage;

    #[test]
    fn listing_body_decodes_with_server_extras() {
        let body = r#"{
            "files": [
                {"url": "/uploads/media_library/a.png", "name": "a.png",
                 "folder": "media_library", "size": 2048, "created": 1700000000.5}
            ],
            "page": 2,
            "total_count": 25,
            "has_next": false
        }"#;

        let page: MediaPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.files.len(), 1);
        assert_eq!(page.files[0].url, "/uploads/media_library/a.png");
        assert_eq!(page.files[0].folder.as_deref(), Some("media_library"));
        assert_eq!(page.files[0].size, Some(2048));
        assert_eq!(page.total_count, Some(25));
        assert!(!page.has_next);
    }

    #[test]
    fn listing_body_decodes_minimal_shape() {
        let body = r#"{"files": [{"url": "/u/b.jpg", "name": "b.jpg"}], "has_next": true}"#;

        let page: MediaPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.files[0], MediaDescriptor::new("/u/b.jpg", "b.jpg"));
        assert!(page.has_next);
        assert!(page.total_count.is_none());
    }

    #[test]
    fn successful_upload_returns_file() {
        let response = UploadResponse::parse(
            r#"{"success": true, "file": {"url": "/uploads/media_library/c.webp", "name": "c.webp"}}"#,
        );

        let file = response.into_result().unwrap().unwrap();
        assert_eq!(file.name, "c.webp");
    }

    #[test]
    fn error_body_is_rejected_with_message() {
        let response = UploadResponse::parse(r#"{"error": "No selected file"}"#);

        match response.into_result() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "No selected file"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_rejected() {
        let response = UploadResponse::parse("<html>Internal Server Error</html>");

        assert!(!response.success);
        assert!(matches!(response.into_result(), Err(ApiError::Rejected(_))));
    }
}
