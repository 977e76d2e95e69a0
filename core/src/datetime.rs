// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{
    DateTime, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc, offset::LocalResult,
};

use crate::calendar::YearMonth;
use crate::event::DayKey;

/// Format used for typed wall-clock times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Format used for typed local date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Puts the hour and minute of `time` on the calendar date `day` of `month`.
///
/// Seconds and sub-seconds are zeroed. A day key outside of the month (0, or
/// 31 in a 30-day month) is clamped into the month, so the result is always
/// anchored to a valid date.
pub fn merge_date_and_time<Tz: TimeZone>(
    tz: &Tz,
    month: YearMonth,
    day: DayKey,
    time: NaiveTime,
) -> DateTime<Tz> {
    if !month.contains(day) {
        tracing::warn!(day, %month, "day key outside of month, clamping");
    }

    let date = month.clamped_date(day);
    let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(NaiveTime::MIN);
    from_local_datetime(tz, NaiveDateTime::new(date, time))
}

/// Convert the `NaiveDateTime` to the given timezone, handles local time ambiguities:
/// - `Single(dt)` returns directly;
/// - `Ambiguous(a, b)` takes the earlier one;
/// - `None` (local time does not exist, e.g., due to DST transition): falls back to UTC
///   combination and then converts.
pub fn from_local_datetime<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(x) => x,
        LocalResult::Ambiguous(a, b) => {
            tracing::warn!(%naive, "ambiguous local time, picking earliest");
            if a <= b { a } else { b }
        }
        LocalResult::None => {
            tracing::warn!(%naive, "invalid local time, falling back to UTC");
            Utc.from_utc_datetime(&naive).with_timezone(tz)
        }
    }
}

/// Parses a typed `HH:MM` time, `None` for anything else.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).ok()
}

/// Parses a typed `YYYY-MM-DD HH:MM` local date-time, `None` for anything else.
pub fn parse_datetime<Tz: TimeZone>(tz: &Tz, s: &str) -> Option<DateTime<Tz>> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT)
        .ok()
        .map(|naive| from_local_datetime(tz, naive))
}
