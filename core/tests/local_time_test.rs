// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Local time parsing across a DST transition.
//!
//! Runs in its own test binary because it pins the process time zone through
//! `TZ`, using a POSIX rule so no tz database is needed.

#![allow(unsafe_code)]

use calmodal_core::parse_datetime;
use chrono::{Local, Offset, TimeZone};

#[test]
fn times_around_spring_forward() {
    unsafe {
        std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0");
    }
    let now = Local.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap();

    // 02:00 jumps to 03:00 on 2025-03-09
    assert_eq!(
        parse_datetime("2025-03-09 02:30", &now),
        Err("Invalid local time")
    );

    let before = parse_datetime("2025-03-09 01:30", &now).unwrap();
    let after = parse_datetime("2025-03-09 03:30", &now).unwrap();
    assert_eq!(before.offset().fix().local_minus_utc(), -5 * 3600);
    assert_eq!(after.offset().fix().local_minus_utc(), -4 * 3600);
    assert_eq!(after - before, chrono::TimeDelta::hours(1));
}
