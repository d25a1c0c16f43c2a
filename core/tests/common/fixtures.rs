// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use calmodal_core::{ActiveEvent, CalendarEvent};
use chrono::{DateTime, Local, TimeDelta, TimeZone};

/// Builds a local date-time, panicking on nonexistent local times.
#[must_use]
pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("test date-time must exist in the local timezone")
}

/// A fixed "now" that is not on the hour.
#[must_use]
pub fn test_now() -> DateTime<Local> {
    local(2025, 6, 12, 10, 37)
}

/// The event being edited in the edit scenario: starts at the next full hour
/// of [`test_now`] and lasts one hour.
#[must_use]
pub fn hola_mundo() -> ActiveEvent {
    let start = local(2025, 6, 12, 11, 0);
    ActiveEvent {
        id: None,
        title: "Hola mundo".to_string(),
        notes: "Alguna nota".to_string(),
        start,
        end: start + TimeDelta::hours(1),
    }
}

#[must_use]
pub fn stored_event(id: &str, title: &str, start: DateTime<Local>) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        notes: String::new(),
        start,
        end: start + TimeDelta::hours(1),
    }
}
