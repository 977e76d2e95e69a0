// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.
//!
//! These tests validate how configuration affects the calendar, including the
//! holiday table and the event key mode.

use std::time::Duration;

use daycal_core::{CalendarView, Config, EventKey, HolidayKind, Marker, SplashDelay};

use crate::common::date;

#[test]
fn config_defaults_apply_when_empty() {
    let mut config: Config = toml::from_str("").unwrap();
    config.normalize().unwrap();

    assert_eq!(config.splash_delay, SplashDelay(Duration::from_secs(5)));
    assert_eq!(config.event_key, EventKey::Day);
    assert_eq!(config.holiday_table().len(), 8);
}

#[test]
fn config_holidays_replace_default_table() {
    let mut config: Config = toml::from_str(
        r#"
event_key = "date"
holidays = [{ day = 1, kind = "bank" }, { day = 1, kind = "bank" }]
"#,
    )
    .unwrap();
    config.normalize().unwrap();

    let view = CalendarView::new(date(2026, 10, 18), config.holiday_table(), config.event_key);
    assert_eq!(
        view.holiday_types_for_day(1),
        vec![HolidayKind::Bank, HolidayKind::Bank]
    );
    assert!(view.holiday_types_for_day(4).is_empty());

    let store = daycal_core::EventStore::new();
    assert_eq!(
        view.markers_for_day(&store, 1),
        vec![
            Marker::Holiday(HolidayKind::Bank),
            Marker::Holiday(HolidayKind::Bank)
        ]
    );
}

#[test]
fn config_log_file_home_is_expanded() {
    let mut config: Config = toml::from_str(r#"log_file = "~/daycal.log""#).unwrap();
    config.normalize().unwrap();
    let path = config.log_file.unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("daycal.log"));
}
