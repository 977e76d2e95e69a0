// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of daycal: the month calendar model, holiday table, event store and
//! the editor draft that validates and saves events.

mod calendar;
mod config;
mod datetime;
mod editor;
mod error;
mod event;
mod holiday;
mod store;

pub use crate::calendar::{CalendarView, DaySelection, Marker, YearMonth, days_in_month};
pub use crate::config::{APP_NAME, Config, SplashDelay};
pub use crate::datetime::{
    DATETIME_FORMAT, TIME_FORMAT, merge_date_and_time, parse_datetime, parse_time,
};
pub use crate::editor::{EventDraft, MissingField, SaveOutcome};
pub use crate::error::Error;
pub use crate::event::{DayKey, Event, EventKey, LeadTime, Notification};
pub use crate::holiday::{
    DEFAULT_HOLIDAYS, HolidayEntry, HolidayKind, default_holidays, holiday_types_for_day,
};
pub use crate::store::{EventStore, StoreChange, SubscriptionId};
