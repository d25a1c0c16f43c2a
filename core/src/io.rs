// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io::ErrorKind, path::Path};

use tokio::fs;

use crate::event::CalendarEvent;

/// Reads the events file. A file that does not exist yet holds no events.
#[tracing::instrument]
pub async fn load_events(path: &Path) -> Result<Vec<CalendarEvent>, Box<dyn Error>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("events file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(format!("Failed to read events file at {}: {e}", path.display()).into());
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let events: Vec<CalendarEvent> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse events file at {}: {e}", path.display()))?;
    tracing::debug!(count = events.len(), "events loaded");
    Ok(events)
}

/// Writes the events file, creating its directory if needed.
#[tracing::instrument(skip(events), fields(count = events.len()))]
pub async fn save_events(path: &Path, events: &[CalendarEvent]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(events)?;
    fs::write(path, content)
        .await
        .map_err(|e| format!("Failed to write events file at {}: {e}", path.display()))?;
    Ok(())
}
