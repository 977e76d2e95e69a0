// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar navigation workflow tests.

use chrono::{Datelike, Timelike, Utc};
use daycal_core::{CalendarView, EventKey, YearMonth, days_in_month, merge_date_and_time};

use crate::common::{date, hm, october, test_view};

#[test]
fn february_lengths_follow_leap_years() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
}

#[test]
fn a_year_of_months_returns_to_the_same_month() {
    let mut view = test_view(EventKey::Day);
    let start = view.month();
    for _ in 0..12 {
        view.change_month(1);
    }
    assert_eq!(view.month(), YearMonth::new(start.year + 1, start.month));
    assert_eq!(view.selected().day(), 1);

    for _ in 0..12 {
        view.change_month(-1);
    }
    assert_eq!(view.month(), start);
}

#[test]
fn grid_covers_every_day_once() {
    let mut view = CalendarView::new(date(2024, 2, 10), vec![], EventKey::Day);
    for _ in 0..24 {
        let days: Vec<u32> = view.grid().iter().flatten().flatten().copied().collect();
        let expected: Vec<u32> = (1..=view.days_in_month()).collect();
        assert_eq!(days, expected, "{}", view.month_title());
        view.change_month(1);
    }
}

#[test]
fn today_highlight_follows_displayed_month() {
    let mut view = test_view(EventKey::Day);
    assert!(view.is_today(18));
    view.change_month(1);
    assert!(!view.is_today(18));
    view.change_month(-1);
    assert!(view.is_today(18));
}

#[test]
fn merged_times_land_on_valid_dates() {
    let feb = YearMonth::new(2026, 2);
    for day in [0, 29, 30, 31] {
        let dt = merge_date_and_time(&Utc, feb, day, hm(7, 45).unwrap());
        assert_eq!(dt.month(), 2, "day {day}");
        assert!((1..=28).contains(&dt.day()), "day {day}");
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (7, 45, 0));
    }

    let dt = merge_date_and_time(&Utc, october(), 31, hm(23, 59).unwrap());
    assert_eq!(dt.day(), 31);
}
