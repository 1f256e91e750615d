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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_NAME: &str = "pickui";

const LOG_FILE_NAME: &str = "pickui.log";

pub(crate) const MAX_UPLOAD_WORKERS: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub server_url: String,
    pub session_cookie: Option<String>,
    pub request_timeout_secs: u64,
    pub upload_workers: usize,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server_url: "http://localhost:5000".to_string(),
            session_cookie: None,
            request_timeout_secs: 30,
            upload_workers: 1,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Number of concurrent uploads, never zero.
    pub(crate) fn upload_workers(&self) -> usize {
        self.upload_workers.clamp(1, MAX_UPLOAD_WORKERS)
    }

    /// Location of the log file, by default next to the configuration file.
    pub(crate) fn log_path(&self) -> PathBuf {
        if let Some(path) = self.log_file.as_deref().filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        confy::get_configuration_file_path(CONFIG_NAME, None)
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join(LOG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_workers_are_clamped() {
        let mut config = AppConfig::default();
        assert_eq!(config.upload_workers(), 1);

        config.upload_workers = 0;
        assert_eq!(config.upload_workers(), 1);

        config.upload_workers = 64;
        assert_eq!(config.upload_workers(), MAX_UPLOAD_WORKERS);
    }

    #[test]
    fn explicit_log_file_wins() {
        let config = AppConfig {
            log_file: Some("/tmp/picker.log".to_string()),
            ..AppConfig::default()
        };

        assert_eq!(config.log_path(), PathBuf::from("/tmp/picker.log"));
    }
}
