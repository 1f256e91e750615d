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

//! Domain models and core data structures.
//!
//! This module defines the entities exchanged with the media library, the
//! remote assets themselves and the pages and upload summaries that carry
//! them.

use serde::Deserialize;

/// A remote media asset as returned by the listing endpoint.
///
/// The `url` is the identity of the asset, everything else is display
/// information that the server may or may not provide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct MediaDescriptor {
    pub(crate) url: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) folder: Option<String>,
    #[serde(default)]
    pub(crate) size: Option<u64>,
    #[serde(default)]
    pub(crate) created: Option<f64>,
}

impl MediaDescriptor {
    pub(crate) fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            folder: None,
            size: None,
            created: None,
        }
    }

    pub(crate) fn same_asset(&self, other: &MediaDescriptor) -> bool {
        self.url == other.url
    }
}

/// One page of the media listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct MediaPage {
    pub(crate) files: Vec<MediaDescriptor>,
    #[serde(default)]
    pub(crate) total_count: Option<usize>,
    pub(crate) has_next: bool,
}

/// Outcome of one upload batch.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub(crate) struct UploadReport {
    pub(crate) attempted: usize,
    pub(crate) succeeded: usize,
}

impl UploadReport {
    pub(crate) fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}
