// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::event::{DayKey, Event, EventKey};

/// A change applied to the [`EventStore`], passed to every subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange<'a> {
    /// An event was appended at the given index.
    Added(usize, &'a Event),

    /// The event at the given index was replaced.
    Replaced(usize, &'a Event),

    /// All events were removed.
    Reset,
}

/// Handle returned by [`EventStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange<'_>)>;

/// The in-memory list of events for the session.
#[derive(Default)]
pub struct EventStore {
    events: Vec<Event>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends the event unconditionally, even if its day already has one.
    pub fn add_event(&mut self, event: Event) {
        tracing::debug!(date = event.date, title = %event.title, "adding event");
        self.events.push(event);
        let index = self.events.len() - 1;
        notify(&mut self.listeners, StoreChange::Added(index, &self.events[index]));
    }

    /// Replaces the first event on the same full date, or appends.
    pub fn upsert_event(&mut self, event: Event) {
        let position = self
            .events
            .iter()
            .position(|e| e.is_on(event.year, event.month, event.date));

        match position {
            Some(index) => {
                tracing::debug!(index, date = event.date, "replacing event");
                self.events[index] = event;
                notify(&mut self.listeners, StoreChange::Replaced(index, &self.events[index]));
            }
            None => self.add_event(event),
        }
    }

    /// Saves the event according to the keying mode.
    pub fn save_event(&mut self, event: Event, key: EventKey) {
        match key {
            EventKey::Day => self.add_event(event),
            EventKey::Date => self.upsert_event(event),
        }
    }

    /// The first event with the given day number, whatever its month.
    pub fn find_by_day(&self, day: DayKey) -> Option<&Event> {
        self.events.iter().find(|e| e.date == day)
    }

    /// The first event on the given full date.
    pub fn find_by_date(&self, year: i32, month: u32, day: DayKey) -> Option<&Event> {
        self.events.iter().find(|e| e.is_on(year, month, day))
    }

    /// Finds an event the way [`save_event`](Self::save_event) keys it.
    pub fn find(&self, key: EventKey, year: i32, month: u32, day: DayKey) -> Option<&Event> {
        match key {
            EventKey::Day => self.find_by_day(day),
            EventKey::Date => self.find_by_date(year, month, day),
        }
    }

    /// Removes all events.
    pub fn reset(&mut self) {
        self.events.clear();
        notify(&mut self.listeners, StoreChange::Reset);
    }

    /// Registers a listener called after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&StoreChange<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener, returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(a, _)| *a != id);
        self.listeners.len() != len
    }
}

impl fmt::Debug for EventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("events", &self.events)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn notify(listeners: &mut [(SubscriptionId, Listener)], change: StoreChange<'_>) {
    for (_, listener) in listeners.iter_mut() {
        listener(&change);
    }
}
