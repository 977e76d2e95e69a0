// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event lifecycle workflow tests.
//!
//! Press a day, fill the draft, save it, and read it back through the
//! calendar view.

use std::{cell::RefCell, rc::Rc};

use chrono::{TimeZone, Utc};
use daycal_core::{
    EventDraft, EventKey, EventStore, LeadTime, Marker, SaveOutcome, StoreChange,
};

use crate::common::{assert_event_matches, assert_markers, draft_for, test_view};

#[test]
fn save_then_lookup_by_day() {
    // Arrange
    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();
    let mut draft = draft_for(&mut view, 15, "Standup");
    draft.select_lead_time(LeadTime::FifteenMinutes);

    // Act
    let outcome = draft.handle_save(&mut store, EventKey::Day);

    // Assert
    assert!(matches!(outcome, SaveOutcome::Saved(_)));
    let event = view.event_for_day(&store, 15).unwrap();
    assert_event_matches(event, "Standup", "15m");
    assert_eq!(
        event.start_time,
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap()
    );
    assert_eq!(
        event.end_time,
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 15, 0).unwrap()
    );
}

#[test]
fn invalid_draft_is_silently_rejected() {
    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();

    // no notification chosen yet
    let draft = draft_for(&mut view, 15, "Standup");
    assert!(!draft.is_valid());
    assert_eq!(draft.handle_save(&mut store, EventKey::Day), SaveOutcome::Rejected);
    assert!(store.is_empty());
    assert!(!view.has_event(&store, 15));
}

#[test]
fn second_save_on_same_day_appends() {
    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();

    let mut first = draft_for(&mut view, 15, "Standup");
    first.select_lead_time(LeadTime::FifteenMinutes);
    first.handle_save(&mut store, EventKey::Day);

    let mut second = draft_for(&mut view, 15, "Retro");
    second.select_lead_time(LeadTime::OneHour);
    second.handle_save(&mut store, EventKey::Day);

    assert_eq!(store.len(), 2);
    assert_event_matches(view.event_for_day(&store, 15).unwrap(), "Standup", "15m");
}

#[test]
fn day_key_matches_across_months() {
    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();

    let mut draft = draft_for(&mut view, 15, "Standup");
    draft.select_lead_time(LeadTime::OneDay);
    draft.handle_save(&mut store, EventKey::Day);

    view.change_month(1);
    assert!(view.has_event(&store, 15));
}

#[test]
fn date_key_replaces_and_stays_in_month() {
    let mut view = test_view(EventKey::Date);
    let mut store = EventStore::new();

    let mut first = draft_for(&mut view, 15, "Standup");
    first.select_lead_time(LeadTime::FifteenMinutes);
    first.handle_save(&mut store, EventKey::Date);

    let mut second = draft_for(&mut view, 15, "Retro");
    second.select_lead_time(LeadTime::OneHour);
    second.handle_save(&mut store, EventKey::Date);

    assert_eq!(store.len(), 1);
    assert_event_matches(view.event_for_day(&store, 15).unwrap(), "Retro", "1h");

    view.change_month(1);
    assert!(!view.has_event(&store, 15));
}

#[test]
fn reopening_a_day_prepopulates_the_draft() {
    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();

    let mut draft = draft_for(&mut view, 4, "Dentist");
    draft.note = "second floor".to_string();
    let at = Utc.with_ymd_and_hms(2026, 10, 3, 18, 0, 0).unwrap();
    draft.set_custom_date(Some(at));
    draft.handle_save(&mut store, EventKey::Day);

    let selection = view.on_day_press(4);
    let reopened = EventDraft::for_day_in(Utc, selection, &store, EventKey::Day);
    assert_eq!(reopened.title, "Dentist");
    assert_eq!(reopened.note, "second floor");
    assert_eq!(reopened.custom_date, Some(at));
    assert_eq!(reopened.notification, None);
    assert!(reopened.is_valid());
}

#[test]
fn holiday_day_with_event_has_three_markers() {
    use daycal_core::HolidayKind::{Mercantile, Public};

    let mut view = test_view(EventKey::Day);
    let mut store = EventStore::new();
    let mut draft = draft_for(&mut view, 4, "Parade");
    draft.select_lead_time(LeadTime::OneHour);
    draft.handle_save(&mut store, EventKey::Day);

    assert_eq!(view.holiday_types_for_day(4), vec![Public, Mercantile]);
    assert_markers(
        &view,
        &store,
        4,
        &[
            Marker::Holiday(Public),
            Marker::Holiday(Mercantile),
            Marker::Event,
        ],
    );
}

#[test]
fn observers_see_every_save() {
    let mut view = test_view(EventKey::Date);
    let mut store = EventStore::new();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    let id = store.subscribe(move |change| {
        sink.borrow_mut().push(matches!(change, StoreChange::Replaced(..)));
    });

    for title in ["a", "b"] {
        let mut draft = draft_for(&mut view, 20, title);
        draft.select_lead_time(LeadTime::OneHour);
        draft.handle_save(&mut store, EventKey::Date);
    }
    store.unsubscribe(id);
    store.reset();

    assert_eq!(*changes.borrow(), vec![false, true]);
    assert!(store.is_empty());
}
