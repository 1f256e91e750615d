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

//! Media library API client.
//!
//! This module defines the [`MediaApi`] seam used by the task worker, and the
//! HTTP implementation that talks to the admin media endpoints:
//!
//! * `GET /admin/media/api/list?page=<n>&search=<text>`
//! * `POST /admin/media/api/upload` (multipart field `file`)
//!
//! The endpoints sit behind a login, so the client forwards a configured
//! session cookie with every request.

mod wire;

use std::{path::Path, time::Duration};

use reqwest::{
    StatusCode,
    blocking::{Client, multipart::Form},
    header::{COOKIE, HeaderMap, HeaderValue},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::AppConfig,
    model::{MediaDescriptor, MediaPage},
};

use wire::UploadResponse;

const LIST_PATH: &str = "/admin/media/api/list";
const UPLOAD_PATH: &str = "/admin/media/api/upload";

const USER_AGENT: &str = concat!("pickui/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Cannot read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Access to the remote media library.
///
/// Implementations must be shareable between threads, the upload pool may
/// call [`MediaApi::upload`] from several workers at once.
pub(crate) trait MediaApi: Send + Sync {
    fn list(&self, page: u32, search: &str) -> Result<MediaPage, ApiError>;

    fn upload(&self, path: &Path) -> Result<Option<MediaDescriptor>, ApiError>;
}

pub(crate) struct HttpMediaApi {
    client: Client,
    base_url: String,
}

impl HttpMediaApi {
    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cookie is not a valid header value or
    /// if the underlying HTTP client cannot be constructed.
    pub(crate) fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let value = HeaderValue::from_str(cookie)
                .map_err(|_| ApiError::Config("session cookie is not a valid header".into()))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl MediaApi for HttpMediaApi {
    fn list(&self, page: u32, search: &str) -> Result<MediaPage, ApiError> {
        debug!(page, search, "listing media");

        let response = self
            .client
            .get(self.endpoint(LIST_PATH))
            .query(&[("page", page.to_string()), ("search", search.to_string())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }

        Ok(response.json::<MediaPage>()?)
    }

    fn upload(&self, path: &Path) -> Result<Option<MediaDescriptor>, ApiError> {
        debug!(path = %path.display(), "uploading file");

        let form = Form::new().file("file", path).map_err(|source| ApiError::File {
            path: path.display().to_string(),
            source,
        })?;

        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let outcome = UploadResponse::parse(&body);

        if !status.is_success() {
            let message = outcome.error.unwrap_or(body);
            return Err(ApiError::Status { status, message });
        }

        outcome.into_result()
    }
}
