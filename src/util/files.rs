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

//! Upload path expansion.
//!
//! Turns the paths typed into the upload form into the list of files to send.
//! Directories are walked recursively, and only image types accepted by the
//! media library are kept.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

const UPLOAD_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

pub(crate) fn is_uploadable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| UPLOAD_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Expands whitespace separated paths into a sorted, de-duplicated list of
/// uploadable files.
pub(crate) fn expand_upload_paths(input: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in input.split_whitespace() {
        for entry in WalkDir::new(root).follow_links(true) {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && is_uploadable(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => warn!("Skipping upload path: {}", e),
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_uploadable(Path::new("photo.JPG")));
        assert!(is_uploadable(Path::new("logo.svg")));
        assert!(!is_uploadable(Path::new("notes.txt")));
        assert!(!is_uploadable(Path::new("README")));
    }

    #[test]
    fn directories_are_walked_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("banners");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.png"), b"png").unwrap();
        fs::write(dir.path().join("b.txt"), b"txt").unwrap();
        fs::write(nested.join("c.webp"), b"webp").unwrap();

        let files = expand_upload_paths(&dir.path().display().to_string());

        assert_eq!(files, vec![dir.path().join("a.png"), nested.join("c.webp")]);
    }

    #[test]
    fn repeated_and_missing_paths_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("d.gif");
        fs::write(&file, b"gif").unwrap();
        let missing = dir.path().join("missing.png");

        let input = format!("{} {} {}", file.display(), file.display(), missing.display());
        let files = expand_upload_paths(&input);

        assert_eq!(files, vec![file]);
    }
}
