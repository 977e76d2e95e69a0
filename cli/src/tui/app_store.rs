// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc, time::Duration};

use chrono::{Datelike, Local, NaiveDate};
use daycal_core::{
    CalendarView, Config, EventDraft, EventKey, EventStore, SaveOutcome, StoreChange,
    SubscriptionId, parse_datetime, parse_time,
};

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{format_datetime, format_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Calendar,
    Editor,
}

/// The state behind all screens of the app.
#[derive(Debug)]
pub struct AppStore {
    pub screen: Screen,
    pub view: CalendarView,
    pub events: Rc<RefCell<EventStore>>,
    pub key: EventKey,
    pub splash_delay: Duration,
    pub editor: Option<EditorData>,

    /// Last change reported by the event store, shown on the calendar.
    pub notice: Rc<RefCell<Option<String>>>,
    subscription: SubscriptionId,
}

/// The draft being edited, with the raw text of its typed fields.
#[derive(Debug)]
pub struct EditorData {
    pub draft: EventDraft,
    pub start: String,
    pub end: String,
    pub custom_date: String,
}

impl EditorData {
    fn new(draft: EventDraft) -> Self {
        Self {
            start: draft.start_time.as_ref().map(format_time).unwrap_or_default(),
            end: draft.end_time.as_ref().map(format_time).unwrap_or_default(),
            custom_date: draft
                .custom_date
                .as_ref()
                .map(format_datetime)
                .unwrap_or_default(),
            draft,
        }
    }
}

impl AppStore {
    pub fn new(config: &Config, today: NaiveDate, events: Rc<RefCell<EventStore>>) -> Self {
        let notice = Rc::new(RefCell::new(None));
        let subscription = {
            let notice = notice.clone();
            events.borrow_mut().subscribe(move |change| {
                let text = match change {
                    StoreChange::Added(_, e) => format!("Saved \"{}\" on day {}", e.title, e.date),
                    StoreChange::Replaced(_, e) => {
                        format!("Updated \"{}\" on day {}", e.title, e.date)
                    }
                    StoreChange::Reset => "All events cleared".to_string(),
                };
                *notice.borrow_mut() = Some(text);
            })
        };

        let delay = config.splash_delay.0;
        Self {
            screen: match delay.is_zero() {
                true => Screen::Calendar,
                false => Screen::Splash,
            },
            view: CalendarView::new(today, config.holiday_table(), config.event_key),
            events,
            key: config.event_key,
            splash_delay: delay,
            editor: None,
            notice,
            subscription,
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().reduce(action);
        }));
        dispatcher.register(callback);
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::SkipSplash | Action::SplashElapsed if self.screen == Screen::Splash => {
                tracing::debug!(?action, "leaving splash screen");
                self.screen = Screen::Calendar;
            }
            Action::Tick(today) => self.view.set_today(*today),
            Action::ChangeMonth(offset) => self.view.change_month(*offset),
            Action::MoveSelection(delta) => self.view.move_selection(*delta),
            Action::PressDay => self.open_editor(),
            Action::Back => self.close_editor(),
            Action::Save => self.save(),
            _ => {
                if let Some(editor) = self.editor.as_mut() {
                    update_editor(editor, action);
                }
            }
        }
    }

    fn open_editor(&mut self) {
        let day = self.view.selected().day();
        let selection = self.view.on_day_press(day);
        let draft = EventDraft::for_day(selection, &self.events.borrow(), self.key);
        self.editor = Some(EditorData::new(draft));
        self.screen = Screen::Editor;
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.screen = Screen::Calendar;
    }

    fn save(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };

        let outcome = editor
            .draft
            .handle_save(&mut self.events.borrow_mut(), self.key);
        if let SaveOutcome::Saved(_) = outcome {
            self.close_editor();
        }
    }
}

impl Drop for AppStore {
    fn drop(&mut self) {
        if let Ok(mut events) = self.events.try_borrow_mut() {
            events.unsubscribe(self.subscription);
        }
    }
}

fn update_editor(editor: &mut EditorData, action: &Action) {
    let draft = &mut editor.draft;
    match action {
        Action::UpdateTitle(v) => draft.title = v.clone(),
        Action::UpdateNote(v) => draft.note = v.clone(),
        Action::UpdateStartTime(v) => {
            editor.start = v.clone();
            match v.trim().is_empty() {
                true => draft.start_time = None,
                // an unparsable entry counts as a cancelled pick
                false => draft.pick_start_time(parse_time(v)),
            }
        }
        Action::UpdateEndTime(v) => {
            editor.end = v.clone();
            match v.trim().is_empty() {
                true => draft.end_time = None,
                false => draft.pick_end_time(parse_time(v)),
            }
        }
        Action::SelectLeadTime(Some(lead)) => {
            draft.select_lead_time(*lead);
            editor.custom_date.clear();
        }
        Action::SelectLeadTime(None) => draft.notification = None,
        Action::UpdateCustomDate(v) => {
            editor.custom_date = v.clone();
            if v.trim().is_empty() {
                draft.set_custom_date(None);
            } else if let Some(at) = parse_datetime(&Local, v) {
                draft.set_custom_date(Some(at));
            }
        }
        _ => {}
    }
}
