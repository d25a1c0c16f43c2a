// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the calmodal application.
pub const APP_NAME: &str = "calmodal";

const EVENTS_FILE: &str = "events.json";

/// Core configuration, the `[core]` table of the config file.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Path to the JSON file holding the events.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
}

impl Config {
    /// Normalize the configuration: expand home prefixes and fill in the
    /// default events path.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.events_path = Some(match &self.events_path {
            Some(path) => expand_path(path)
                .map_err(|e| format!("Failed to expand events path: {e}"))?,
            None => get_data_dir()?.join(APP_NAME).join(EVENTS_FILE),
        });
        Ok(())
    }

    /// The events file, only meaningful after [`Config::normalize`].
    pub fn events_path(&self) -> Result<&Path, Box<dyn Error>> {
        self.events_path
            .as_deref()
            .ok_or_else(|| "events path is not configured".into())
    }
}

/// Handle tilde (~) and home variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

fn get_data_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::data_dir().ok_or_else(|| "User-specific data directory not found".into())
}
