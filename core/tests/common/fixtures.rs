// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use chrono::{NaiveDate, NaiveTime, Utc};
use daycal_core::{CalendarView, EventDraft, EventKey, YearMonth, default_holidays};

#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[must_use]
pub fn october() -> YearMonth {
    YearMonth::new(2026, 10)
}

#[must_use]
pub fn hm(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Creates a calendar view on 2026-10-18 with the default holiday table.
#[must_use]
pub fn test_view(key: EventKey) -> CalendarView {
    CalendarView::new(date(2026, 10, 18), default_holidays(), key)
}

/// Presses the day on the view and fills a UTC draft with a 09:00-09:15 slot.
///
/// The notification is left unset.
///
/// # Example
///
/// ```ignore
/// let draft = draft_for(&mut view, 15, "Standup");
/// ```
#[must_use]
pub fn draft_for(view: &mut CalendarView, day: u32, title: &str) -> EventDraft<Utc> {
    let selection = view.on_day_press(day);
    let mut draft = EventDraft::empty(Utc, selection);
    draft.title = title.to_string();
    draft.pick_start_time(hm(9, 0));
    draft.pick_end_time(hm(9, 15));
    draft
}
