// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::offset::LocalResult;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike};

/// Format used to show and edit date-times in forms and tables.
pub const FORMAT_DATETIME: &str = "%Y-%m-%d %H:%M";
const FORMAT_DATE: &str = "%Y-%m-%d";
const FORMAT_TIME: &str = "%H:%M";

/// The default time range of a new event: the next full hour, lasting one hour.
///
/// When the current hour has no valid start in local time, `now` is used instead.
pub fn default_range(now: &DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
    let start = now
        .date_naive()
        .and_hms_opt(now.hour(), 0, 0)
        .and_then(|naive| from_local_datetime(&Local, naive))
        .unwrap_or(*now)
        + TimeDelta::hours(1);

    (start, start + TimeDelta::hours(1))
}

pub fn format_datetime(dt: &DateTime<Local>) -> String {
    dt.format(FORMAT_DATETIME).to_string()
}

/// Parses a date-time typed by the user.
///
/// Accepts `YYYY-MM-DD HH:MM`, `HH:MM` (today) and `YYYY-MM-DD` (at midnight).
/// A time skipped by a DST transition is an error.
pub fn parse_datetime(s: &str, now: &DateTime<Local>) -> Result<DateTime<Local>, &'static str> {
    let s = s.trim();
    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(s, FORMAT_DATETIME) {
        dt
    } else if let Ok(time) = NaiveTime::parse_from_str(s, FORMAT_TIME) {
        NaiveDateTime::new(now.date_naive(), time)
    } else if let Ok(date) = NaiveDate::parse_from_str(s, FORMAT_DATE) {
        NaiveDateTime::new(date, NaiveTime::MIN)
    } else {
        return Err("Invalid date format. Expected format: YYYY-MM-DD, HH:MM and YYYY-MM-DD HH:MM");
    };

    from_local_datetime(&Local, naive).ok_or("Invalid local time")
}

/// Convert the `NaiveDateTime` to the given timezone.
fn from_local_datetime<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    earliest(tz.from_local_datetime(&naive), &naive)
}

/// Resolves local time ambiguities:
/// - `Single(dt)` returns directly;
/// - `Ambiguous(a, b)` takes the earlier one;
/// - `None` (skipped by a DST transition) has no instant.
fn earliest<Tz: TimeZone>(local: LocalResult<DateTime<Tz>>, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match local {
        LocalResult::Single(x) => Some(x),
        LocalResult::Ambiguous(a, b) => {
            tracing::warn!(?naive, "ambiguous local time, picking earliest");
            Some(if a <= b { a } else { b })
        }
        LocalResult::None => {
            tracing::warn!(?naive, "local time does not exist");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, s).single().unwrap()
    }

    #[test]
    fn default_range_starts_at_next_full_hour() {
        let now = local(2025, 3, 10, 9, 41, 27);
        let (start, end) = default_range(&now);
        assert_eq!(start, local(2025, 3, 10, 10, 0, 0));
        assert_eq!(end, local(2025, 3, 10, 11, 0, 0));
    }

    #[test]
    fn default_range_on_the_hour_still_moves_forward() {
        let now = local(2025, 3, 10, 9, 0, 0);
        let (start, end) = default_range(&now);
        assert_eq!(start, local(2025, 3, 10, 10, 0, 0));
        assert_eq!(end - start, TimeDelta::hours(1));
    }

    #[test]
    fn default_range_crosses_midnight() {
        let now = local(2025, 3, 10, 23, 15, 0);
        let (start, end) = default_range(&now);
        assert_eq!(start, local(2025, 3, 11, 0, 0, 0));
        assert_eq!(end, local(2025, 3, 11, 1, 0, 0));
    }

    #[test]
    fn parses_full_datetime() {
        let now = local(2025, 1, 1, 8, 0, 0);
        let dt = parse_datetime("2025-06-15 14:30", &now).unwrap();
        assert_eq!(dt, local(2025, 6, 15, 14, 30, 0));
    }

    #[test]
    fn parses_time_as_today() {
        let now = local(2025, 1, 1, 8, 0, 0);
        let dt = parse_datetime(" 17:05 ", &now).unwrap();
        assert_eq!(dt, local(2025, 1, 1, 17, 5, 0));
    }

    #[test]
    fn parses_date_as_midnight() {
        let now = local(2025, 1, 1, 8, 0, 0);
        let dt = parse_datetime("2025-02-03", &now).unwrap();
        assert_eq!(dt, local(2025, 2, 3, 0, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        let now = local(2025, 1, 1, 8, 0, 0);
        assert!(parse_datetime("tomorrow-ish", &now).is_err());
        assert!(parse_datetime("", &now).is_err());
    }

    #[test]
    fn nonexistent_local_time_has_no_instant() {
        let naive = NaiveDate::from_ymd_opt(2025, 3, 9)
            .and_then(|d| d.and_hms_opt(2, 30, 0))
            .unwrap();
        assert_eq!(earliest::<Local>(LocalResult::None, &naive), None);
    }

    #[test]
    fn ambiguous_local_time_takes_earliest() {
        let naive = NaiveDate::from_ymd_opt(2025, 11, 2)
            .and_then(|d| d.and_hms_opt(1, 30, 0))
            .unwrap();
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let first = edt.from_local_datetime(&naive).unwrap();
        let second = est.from_local_datetime(&naive).unwrap();
        assert_eq!(earliest(LocalResult::Ambiguous(second, first), &naive), Some(first));
    }

    #[test]
    fn format_matches_parse() {
        let dt = local(2025, 6, 15, 14, 30, 0);
        assert_eq!(format_datetime(&dt), "2025-06-15 14:30");
    }
}
