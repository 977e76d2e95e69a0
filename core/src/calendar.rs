// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::event::{DayKey, Event, EventKey};
use crate::holiday::{HolidayEntry, HolidayKind, holiday_types_for_day};
use crate::store::EventStore;

/// Number of days in the given month (1-based), leap years included.
///
/// Computed as the day before the first of the next month. Out-of-range
/// months are clamped into 1..=12 instead of failing.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let (next_year, next_month) = match month {
        12 => (year + 1, 1),
        m => (year, m + 1),
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// A calendar month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    /// The year, e.g. 2026.
    pub year: i32,

    /// The month, 1-based.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Moves by whole months, rolling over year boundaries in both directions.
    pub fn add_months(self, offset: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + offset as i64;
        let year = index.div_euclid(12) as i32;
        let month = index.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    /// The given day of this month, clamped into the valid range of the month.
    pub fn clamped_date(&self, day: DayKey) -> NaiveDate {
        let day = day.clamp(1, self.days());
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .or_else(|| NaiveDate::from_ymd_opt(self.year, self.month, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(&self, day: DayKey) -> bool {
        (1..=self.days()).contains(&day)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// A colored dot drawn under a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Holiday(HolidayKind),
    Event,
}

/// The day picked on the calendar, with the month it was picked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySelection {
    pub day: DayKey,
    pub month: YearMonth,
}

/// Derives the visible month grid and per-day markers.
#[derive(Debug, Clone)]
pub struct CalendarView {
    today: NaiveDate,
    selected: NaiveDate,
    holidays: Vec<HolidayEntry>,
    key: EventKey,
}

impl CalendarView {
    /// Creates a view showing the month of `today`, with today selected.
    pub fn new(today: NaiveDate, holidays: Vec<HolidayEntry>, key: EventKey) -> Self {
        Self {
            today,
            selected: today,
            holidays,
            key,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Updates the notion of today, e.g. after the clock passed midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.selected)
    }

    pub fn holidays(&self) -> &[HolidayEntry] {
        &self.holidays
    }

    pub fn days_in_month(&self) -> u32 {
        self.month().days()
    }

    /// Title of the displayed month, e.g. "October 2026".
    pub fn month_title(&self) -> String {
        self.month().to_string()
    }

    /// Advances or retreats the displayed month and selects its first day.
    pub fn change_month(&mut self, offset: i32) {
        let month = self.month().add_months(offset);
        self.selected = month.clamped_date(1);
        tracing::debug!(%month, offset, "changed displayed month");
    }

    /// Selects a day of the displayed month, clamped into the month.
    pub fn select_day(&mut self, day: DayKey) {
        self.selected = self.month().clamped_date(day);
    }

    /// Moves the selection by a number of days without leaving the displayed month.
    pub fn move_selection(&mut self, delta: i64) {
        let day = self.selected.day() as i64 + delta;
        if day >= 1 && day <= self.days_in_month() as i64 {
            self.select_day(day as DayKey);
        }
    }

    pub fn is_today(&self, day: DayKey) -> bool {
        let month = self.month();
        day == self.today.day()
            && month.month == self.today.month()
            && month.year == self.today.year()
    }

    /// All holiday kinds on the given day, in table order, duplicates kept.
    pub fn holiday_types_for_day(&self, day: DayKey) -> Vec<HolidayKind> {
        holiday_types_for_day(&self.holidays, day)
    }

    pub fn has_event(&self, store: &EventStore, day: DayKey) -> bool {
        self.event_for_day(store, day).is_some()
    }

    /// The first stored event matching the day, in store order.
    pub fn event_for_day<'a>(&self, store: &'a EventStore, day: DayKey) -> Option<&'a Event> {
        match self.key {
            EventKey::Day => store.find_by_day(day),
            EventKey::Date => {
                let month = self.month();
                store.find_by_date(month.year, month.month, day)
            }
        }
    }

    /// Holiday markers first, then one event marker if the day has an event.
    pub fn markers_for_day(&self, store: &EventStore, day: DayKey) -> Vec<Marker> {
        let mut markers: Vec<_> = self
            .holiday_types_for_day(day)
            .into_iter()
            .map(Marker::Holiday)
            .collect();

        if self.has_event(store, day) {
            markers.push(Marker::Event);
        }
        markers
    }

    /// Reports the pressed day of the displayed month to the caller.
    pub fn on_day_press(&mut self, day: DayKey) -> DaySelection {
        self.select_day(day);
        let selection = DaySelection {
            day,
            month: self.month(),
        };
        tracing::debug!(?selection, "day pressed");
        selection
    }

    /// Week rows of the displayed month, Sunday first. Blank cells are `None`.
    pub fn grid(&self) -> Vec<[Option<DayKey>; 7]> {
        let month = self.month();
        let first = month.clamped_date(1);
        let lead = first.weekday().num_days_from_sunday() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut column = lead;
        for day in 1..=month.days() {
            week[column] = Some(day);
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }
        weeks
    }
}
