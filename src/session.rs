// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::User;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "NusaBiz", "nusabiz"));

pub fn session_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("session.json"))
}

/// Stored credentials and the active business selection. This is the CLI
/// counterpart of the web client's local storage keys (token, business id,
/// cached user blob).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub business_id: Option<i64>,
    pub user: Option<User>,
}

impl Session {
    pub fn load() -> Result<Session> {
        Self::load_from(&session_path()?)
    }

    /// A missing or corrupt session file reads as logged out.
    pub fn load_from(path: &Path) -> Result<Session> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(err) => Err(err).with_context(|| format!("Read session at {}", path.display())),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&session_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("Write session at {}", path.display()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn require_business(&self) -> Result<i64> {
        self.business_id.context(
            "No active business. Run 'nusabiz business add' or 'nusabiz business select' first",
        )
    }
}

pub fn clear() -> Result<()> {
    clear_at(&session_path()?)
}

pub fn clear_at(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("Clear session at {}", path.display())),
    }
}
