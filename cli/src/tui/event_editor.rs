// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use daycal_core::{LeadTime, MissingField};
use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::tui::app_store::{AppStore, EditorData};
use crate::tui::component::{Component, Message, set_line_clipped};
use crate::tui::component_form::{Access, Form, Input, RadioGroup};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};

const HEADER_HEIGHT: u16 = 3;

pub fn new_event_editor() -> SinglePage<AppStore, EventEditor> {
    SinglePage::new("Event", EventEditor::new()).with_instructions(vec![
        ("Prev", "<Up>"),
        ("Next", "<Down>"),
        ("Save", "<Enter>"),
        ("Back", "<Esc>"),
    ])
}

/// The selected day, the validation hint and the form of the draft.
pub struct EventEditor {
    form: Form<AppStore>,
}

impl EventEditor {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                Box::new(new_title()),
                Box::new(new_start()),
                Box::new(new_end()),
                Box::new(new_lead_time()),
                Box::new(new_custom_date()),
                Box::new(new_note()),
            ]),
        }
    }

    fn split(area: Rect) -> [Rect; 2] {
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)])
            .horizontal_margin(1)
            .areas(area)
    }
}

impl Component<AppStore> for EventEditor {
    fn render(&self, store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        let [header, body] = Self::split(area);
        {
            let store = store.borrow();
            if let Some(editor) = store.editor.as_ref() {
                let selection = editor.draft.selection();
                let date = format!("{} {}", selection.day, selection.month);
                let line = Line::from(vec!["Date: ".bold(), date.into()]);
                set_line_clipped(buf, header, header.x, header.y, &line);
                set_line_clipped(buf, header, header.x, header.y + 1, &status_line(editor));
            }
        }
        self.form.render(store, body, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<AppStore>, area: Rect) -> Option<(u16, u16)> {
        let [_, body] = Self::split(area);
        self.form.get_cursor_position(store, body)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let [_, body] = Self::split(area);
        self.form.on_key(dispatcher, store, body, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.form.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        self.form.deactivate(dispatcher, store);
    }
}

fn status_line(editor: &EditorData) -> Line<'static> {
    let missing = editor.draft.missing_fields();
    if missing.is_empty() {
        return Line::from("Ready to save".green());
    }

    let hints: Vec<_> = missing.into_iter().map(missing_hint).collect();
    Line::from(format!("Missing: {}", hints.join(", ")).dark_gray())
}

fn missing_hint(field: MissingField) -> &'static str {
    match field {
        MissingField::Title => "title",
        MissingField::StartTime => "start time",
        MissingField::EndTime => "end time",
        MissingField::TimeOrder => "end after start",
        MissingField::Notification => "notification",
    }
}

fn with_editor<T: Default>(store: &RefCell<AppStore>, f: impl FnOnce(&EditorData) -> T) -> T {
    store.borrow().editor.as_ref().map(f).unwrap_or_default()
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, |$e: ident| $get: expr, $action: ident) => {
        fn $fn() -> Input<AppStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<AppStore, String> for $acc {
            fn get(store: &RefCell<AppStore>) -> String {
                with_editor(store, |$e| $get.clone())
            }

            fn set(dispatcher: &mut Dispatcher, value: String) {
                dispatcher.dispatch(Action::$action(value));
            }
        }
    };
}

new_input!(new_title, "Title", TitleAccess, |e| e.draft.title, UpdateTitle);
new_input!(new_note, "Note", NoteAccess, |e| e.draft.note, UpdateNote);
new_input!(new_start, "Start (HH:MM)", StartAccess, |e| e.start, UpdateStartTime);
new_input!(new_end, "End (HH:MM)", EndAccess, |e| e.end, UpdateEndTime);
new_input!(
    new_custom_date,
    "Custom notification (YYYY-MM-DD HH:MM)",
    CustomDateAccess,
    |e| e.custom_date,
    UpdateCustomDate
);

fn new_lead_time() -> RadioGroup<AppStore, LeadTime, LeadTimeAccess> {
    let values = LeadTime::ALL.to_vec();
    let options = values.iter().map(|a| a.label().to_string()).collect();
    RadioGroup::new("Notify before", values, options)
}

struct LeadTimeAccess;

impl Access<AppStore, Option<LeadTime>> for LeadTimeAccess {
    fn get(store: &RefCell<AppStore>) -> Option<LeadTime> {
        with_editor(store, |e| e.draft.notification)
    }

    fn set(dispatcher: &mut Dispatcher, value: Option<LeadTime>) {
        dispatcher.dispatch(Action::SelectLeadTime(value));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;
    use daycal_core::{Config, EventStore};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn setup() -> (Rc<RefCell<AppStore>>, Dispatcher, SinglePage<AppStore, EventEditor>) {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let events = Rc::new(RefCell::new(EventStore::new()));
        let store = Rc::new(RefCell::new(AppStore::new(&Config::default(), today, events)));
        let mut dispatcher = Dispatcher::new();
        AppStore::register_to(store.clone(), &mut dispatcher);
        dispatcher.dispatch(Action::MoveSelection(-3));
        dispatcher.dispatch(Action::PressDay);

        let mut editor = new_event_editor();
        editor.activate(&mut dispatcher, &store);
        (store, dispatcher, editor)
    }

    fn type_text(
        editor: &mut SinglePage<AppStore, EventEditor>,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        text: &str,
    ) {
        let area = Rect::new(0, 0, 60, 30);
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            editor.on_key(dispatcher, store, area, key);
        }
    }

    fn press(
        editor: &mut SinglePage<AppStore, EventEditor>,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        code: KeyCode,
    ) -> Option<Message> {
        let area = Rect::new(0, 0, 60, 30);
        editor.on_key(dispatcher, store, area, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn fills_and_saves_through_keys() {
        let (store, mut dispatcher, mut editor) = setup();
        type_text(&mut editor, &mut dispatcher, &store, "Standup");
        press(&mut editor, &mut dispatcher, &store, KeyCode::Tab);
        type_text(&mut editor, &mut dispatcher, &store, "09:00");
        press(&mut editor, &mut dispatcher, &store, KeyCode::Tab);
        type_text(&mut editor, &mut dispatcher, &store, "09:15");
        press(&mut editor, &mut dispatcher, &store, KeyCode::Tab);
        press(&mut editor, &mut dispatcher, &store, KeyCode::Right);
        press(&mut editor, &mut dispatcher, &store, KeyCode::Enter);

        let store = store.borrow();
        assert!(store.editor.is_none());
        let events = store.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events.events()[0].title, "Standup");
        assert_eq!(events.events()[0].date, 15);
        assert_eq!(events.events()[0].notification.to_string(), "15m");
    }

    #[test]
    fn enter_on_incomplete_draft_stays() {
        let (store, mut dispatcher, mut editor) = setup();
        type_text(&mut editor, &mut dispatcher, &store, "Standup");
        press(&mut editor, &mut dispatcher, &store, KeyCode::Enter);

        let store = store.borrow();
        assert!(store.editor.is_some());
        assert!(store.events.borrow().is_empty());
    }

    #[test]
    fn escape_asks_to_leave() {
        let (store, mut dispatcher, mut editor) = setup();
        let msg = press(&mut editor, &mut dispatcher, &store, KeyCode::Esc);
        assert_eq!(msg, Some(Message::Exit));
    }

    #[test]
    fn renders_into_tiny_areas() {
        let (store, _dispatcher, editor) = setup();
        for height in 0..12 {
            for width in [0, 3, 20, 60] {
                let area = Rect::new(0, 0, width, height);
                let mut buf = Buffer::empty(area);
                editor.render(&store, area, &mut buf);
                let _ = editor.get_cursor_position(&store, area);
            }
        }
    }

    #[test]
    fn renders_date_and_missing_fields() {
        let (store, mut dispatcher, mut editor) = setup();
        type_text(&mut editor, &mut dispatcher, &store, "Standup");

        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        editor.render(&store, area, &mut buf);

        let lines: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        assert!(lines.iter().any(|l| l.contains("Date: 15 October 2026")));
        assert!(
            lines
                .iter()
                .any(|l| l.contains("Missing: start time, end time, notification"))
        );
        assert!(lines.iter().any(|l| l.contains("Standup")));
        assert!(lines.iter().any(|l| l.contains("[ ] 15 mins")));
    }
}
