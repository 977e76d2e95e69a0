// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use daycal_core::{CalendarView, Event, EventStore, Marker};

/// Asserts the title and notification string of a stored event.
///
/// # Panics
///
/// Panics if either field differs.
pub fn assert_event_matches(event: &Event, title: &str, notification: &str) {
    assert_eq!(event.title, title, "Event title mismatch");
    assert_eq!(
        event.notification.to_string(),
        notification,
        "Event notification mismatch"
    );
}

/// Asserts the markers drawn under a day cell, left to right.
pub fn assert_markers(view: &CalendarView, store: &EventStore, day: u32, expected: &[Marker]) {
    assert_eq!(
        view.markers_for_day(store, day),
        expected,
        "Markers mismatch for day {day}"
    );
}
