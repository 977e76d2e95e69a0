// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

use crate::calendar::DaySelection;
use crate::datetime::merge_date_and_time;
use crate::event::{Event, EventKey, LeadTime, Notification};
use crate::store::EventStore;

/// A validity rule the draft does not satisfy yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Title,
    StartTime,
    EndTime,
    /// Both times are set but the end is not after the start.
    TimeOrder,
    Notification,
}

/// The result of [`EventDraft::handle_save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The draft was saved; the caller should navigate back.
    Saved(Event),

    /// The draft is incomplete; nothing was stored.
    Rejected,
}

/// In-progress fields of the event for a single day, possibly invalid.
#[derive(Debug, Clone)]
pub struct EventDraft<Tz: TimeZone = Local> {
    tz: Tz,
    selection: DaySelection,

    pub title: String,
    pub note: String,
    pub start_time: Option<DateTime<Tz>>,
    pub end_time: Option<DateTime<Tz>>,
    pub notification: Option<LeadTime>,
    pub custom_date: Option<DateTime<Tz>>,
}

impl EventDraft<Local> {
    /// Creates a draft for the selected day, pre-populated from the stored
    /// event of that day if there is one.
    pub fn for_day(selection: DaySelection, store: &EventStore, key: EventKey) -> Self {
        Self::for_day_in(Local, selection, store, key)
    }
}

impl<Tz: TimeZone> EventDraft<Tz> {
    pub fn for_day_in(tz: Tz, selection: DaySelection, store: &EventStore, key: EventKey) -> Self {
        let month = selection.month;
        let existing = store.find(key, month.year, month.month, selection.day);
        tracing::debug!(?selection, existing = existing.is_some(), "opening draft");

        let mut draft = Self::empty(tz, selection);
        if let Some(event) = existing {
            draft.title = event.title.clone();
            draft.note = event.note.clone();
            draft.start_time = Some(event.start_time.with_timezone(&draft.tz));
            draft.end_time = Some(event.end_time.with_timezone(&draft.tz));
            match event.notification {
                Notification::Unset => {}
                Notification::LeadTime(lead) => draft.notification = Some(lead),
                Notification::At(at) => draft.custom_date = Some(at.with_timezone(&draft.tz)),
            }
        }
        draft
    }

    pub fn empty(tz: Tz, selection: DaySelection) -> Self {
        Self {
            tz,
            selection,
            title: String::new(),
            note: String::new(),
            start_time: None,
            end_time: None,
            notification: None,
            custom_date: None,
        }
    }

    pub fn selection(&self) -> DaySelection {
        self.selection
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Places a wall-clock time on the draft's day.
    pub fn merge_time(&self, time: NaiveTime) -> DateTime<Tz> {
        merge_date_and_time(&self.tz, self.selection.month, self.selection.day, time)
    }

    /// Applies the time picked for the start, `None` when the picker was cancelled.
    pub fn pick_start_time(&mut self, time: Option<NaiveTime>) {
        if let Some(time) = time {
            self.start_time = Some(self.merge_time(time));
        }
    }

    /// Applies the time picked for the end, `None` when the picker was cancelled.
    pub fn pick_end_time(&mut self, time: Option<NaiveTime>) {
        if let Some(time) = time {
            self.end_time = Some(self.merge_time(time));
        }
    }

    /// Chooses a lead time; a previously chosen custom date is dropped.
    pub fn select_lead_time(&mut self, lead: LeadTime) {
        self.notification = Some(lead);
        self.custom_date = None;
    }

    /// Chooses a custom notification date; a previously chosen lead time is dropped.
    pub fn set_custom_date(&mut self, at: Option<DateTime<Tz>>) {
        if at.is_some() {
            self.notification = None;
        }
        self.custom_date = at;
    }

    /// Every rule the draft breaks, empty when it can be saved.
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(MissingField::Title);
        }
        match (&self.start_time, &self.end_time) {
            (None, None) => {
                missing.push(MissingField::StartTime);
                missing.push(MissingField::EndTime);
            }
            (None, Some(_)) => missing.push(MissingField::StartTime),
            (Some(_), None) => missing.push(MissingField::EndTime),
            (Some(start), Some(end)) if start >= end => missing.push(MissingField::TimeOrder),
            (Some(_), Some(_)) => {}
        }
        if self.notification.is_none() && self.custom_date.is_none() {
            missing.push(MissingField::Notification);
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Builds the event to store, `None` while the draft is invalid.
    pub fn to_event(&self) -> Option<Event> {
        if !self.is_valid() {
            return None;
        }

        let start_time = self.start_time.as_ref()?.with_timezone(&Utc);
        let end_time = self.end_time.as_ref()?.with_timezone(&Utc);
        let notification = match (&self.custom_date, self.notification) {
            (Some(at), _) => Notification::At(at.with_timezone(&Utc)),
            (None, Some(lead)) => Notification::LeadTime(lead),
            (None, None) => Notification::Unset,
        };

        Some(Event {
            date: self.selection.day,
            month: self.selection.month.month,
            year: self.selection.month.year,
            title: self.title.clone(),
            note: self.note.clone(),
            start_time,
            end_time,
            notification,
        })
    }

    /// Commits the draft into the store. An invalid draft is silently rejected.
    pub fn handle_save(&self, store: &mut EventStore, key: EventKey) -> SaveOutcome {
        match self.to_event() {
            Some(event) => {
                store.save_event(event.clone(), key);
                tracing::info!(date = event.date, title = %event.title, "event saved");
                SaveOutcome::Saved(event)
            }
            None => {
                tracing::debug!(missing = ?self.missing_fields(), "save rejected");
                SaveOutcome::Rejected
            }
        }
    }
}
