// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_offset_of_grapheme, byte_range_of_grapheme_at, grapheme_count, unicode_width_of_graphemes,
};

/// A vertical list of fields, one of them focused.
pub struct Form<S> {
    items: Vec<Box<dyn FormItem<S>>>,
    item_index: usize,
}

impl<S> Form<S> {
    pub fn new(items: Vec<Box<dyn FormItem<S>>>) -> Self {
        Self {
            items,
            item_index: 0,
        }
    }

    fn layout(&self) -> Layout {
        Layout::vertical(self.items.iter().map(|_| Constraint::Max(3)))
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, offset: isize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        let len = self.items.len() as isize;
        self.item_index = (self.item_index as isize + offset).rem_euclid(len) as usize;

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S> Component<S> for Form<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout().split(area);
        let last = self.items.len().saturating_sub(1);
        for (i, (item, area)) in self.items.iter().zip(areas.iter()).enumerate() {
            item_render(i == last, item.as_ref(), *area, buf);
            item.render(store, item_inner(*area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let areas = self.layout().split(area);
        let item = self.items.get(self.item_index)?;
        let area = areas.get(self.item_index)?;
        item.get_cursor_position(store, item_inner(*area))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout().split(area);
        if let (Some(item), Some(subarea)) =
            (self.items.get_mut(self.item_index), areas.get(self.item_index))
            && let Some(msg) = item.on_key(dispatcher, store, item_inner(*subarea), event)
        {
            return Some(msg);
        }

        match event.code {
            KeyCode::Up | KeyCode::BackTab if !self.items.is_empty() => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if !self.items.is_empty() => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter => {
                dispatcher.dispatch(Action::Save);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.item_index = 0;
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self) -> &str;
    fn is_active(&self) -> bool;
}

/// Reads a field from the store and writes it back through an action.
pub trait Access<S, T> {
    fn get(store: &RefCell<S>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T);
}

/// A single-line text field.
pub struct Input<S, A: Access<S, String>> {
    title: String,
    active: bool,
    /// Cursor position, in grapheme clusters.
    character_index: usize,
    _phantom: PhantomData<(S, A)>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            character_index: 0,
            _phantom: PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let width = unicode_width_of_graphemes(&v, self.character_index);
        Some((area.x + width as u16, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active {
            return None;
        }

        let mut v = A::get(store);
        match event.code {
            Left => self.character_index = self.character_index.saturating_sub(1),
            Right => self.character_index = (self.character_index + 1).min(grapheme_count(&v)),
            Home => self.character_index = 0,
            End => self.character_index = grapheme_count(&v),
            Backspace if self.character_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    A::set(dispatcher, v);
                    self.character_index -= 1;
                }
            }
            Delete => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index) {
                    v.replace_range(range, "");
                    A::set(dispatcher, v);
                }
            }
            Char(c) => {
                v.insert(byte_offset_of_grapheme(&v, self.character_index), c);
                A::set(dispatcher, v);
                self.character_index += 1;
            }
            Backspace => {}
            _ => return None,
        };

        // Always update the cursor position for simplicity
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = grapheme_count(&A::get(store));
    }

    fn deactivate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
        self.character_index = 0;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// One choice out of a fixed list, or none at all.
pub struct RadioGroup<S, T: Eq + Copy, A: Access<S, Option<T>>> {
    title: String,
    values: Vec<T>,
    options: Vec<String>,
    active: bool,
    _phantom: PhantomData<(S, A)>,
}

impl<S, T: Eq + Copy, A: Access<S, Option<T>>> RadioGroup<S, T, A> {
    pub fn new(title: impl ToString, values: Vec<T>, options: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            values,
            options,
            active: false,
            _phantom: PhantomData,
        }
    }

    fn selected(&self, store: &RefCell<S>) -> Option<usize> {
        let v = A::get(store)?;
        self.values.iter().position(|s| *s == v)
    }

    fn split(&self, area: Rect) -> Rc<[Rect]> {
        let constraints = self
            .options
            .iter()
            // 5 = active marker [ ] (3) + space (1) + gap (1)
            .map(|s| Constraint::Length(5 + s.width() as u16));

        Layout::horizontal(constraints).split(area)
    }
}

impl<S, T: Eq + Copy, A: Access<S, Option<T>>> Component<S> for RadioGroup<S, T, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let selected = self.selected(store);
        for (i, (value, area)) in self.options.iter().zip(self.split(area).iter()).enumerate() {
            let icon = if selected == Some(i) { 'x' } else { ' ' };
            Paragraph::new(format!("[{icon}] {value}")).render(*area, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let index = self.selected(store).unwrap_or(0);
        self.split(area).get(index).map(|area| (area.x + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.values.is_empty() {
            return None;
        }

        let len = self.values.len();
        let index = match (event.code, self.selected(store)) {
            (KeyCode::Left, Some(i)) => (i + len - 1) % len,
            (KeyCode::Right, Some(i)) => (i + 1) % len,
            (KeyCode::Left, None) => len - 1,
            (KeyCode::Right, None) => 0,
            (KeyCode::Backspace | KeyCode::Delete, _) => {
                A::set(dispatcher, None);
                return Some(Message::CursorUpdated);
            }
            _ => return None,
        };

        A::set(dispatcher, self.values.get(index).copied());
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, T: Eq + Copy, A: Access<S, Option<T>>> FormItem<S> for RadioGroup<S, T, A> {
    fn item_title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";
const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn item_render<S>(is_last: bool, item: &dyn FormItem<S>, area: Rect, buf: &mut Buffer) {
    let (symbol, color) = match item.is_active() {
        true => (S_STEP_ACTIVE, Color::Blue),
        false => (S_STEP_INACTIVE, Color::Gray),
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1)
        .intersection(area)
        .intersection(buf.area);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title())
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if area.height > 1
        && let Some(c) = buf.cell_mut((area.x, area.y + area.height - 1))
    {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    #[derive(Default)]
    struct Store {
        text: String,
        choice: Option<u8>,
    }

    struct TextAccess;

    thread_local! {
        static LAST: RefCell<Vec<Action>> = const { RefCell::new(Vec::new()) };
    }

    impl Access<Store, String> for TextAccess {
        fn get(store: &RefCell<Store>) -> String {
            store.borrow().text.clone()
        }

        fn set(dispatcher: &mut Dispatcher, value: String) {
            dispatcher.dispatch(Action::UpdateTitle(value));
        }
    }

    struct ChoiceAccess;

    impl Access<Store, Option<u8>> for ChoiceAccess {
        fn get(store: &RefCell<Store>) -> Option<u8> {
            store.borrow().choice
        }

        fn set(dispatcher: &mut Dispatcher, value: Option<u8>) {
            // reuse the month action to carry the choice in tests
            dispatcher.dispatch(Action::ChangeMonth(value.map_or(-1, i32::from)));
        }
    }

    fn setup() -> (Rc<RefCell<Store>>, Dispatcher) {
        let store = Rc::new(RefCell::new(Store::default()));
        let mut dispatcher = Dispatcher::new();
        let that = store.clone();
        dispatcher.register(Rc::new(RefCell::new(move |action: &Action| {
            LAST.with(|a| a.borrow_mut().push(action.clone()));
            match action {
                Action::UpdateTitle(v) => that.borrow_mut().text = v.clone(),
                Action::ChangeMonth(-1) => that.borrow_mut().choice = None,
                Action::ChangeMonth(v) => that.borrow_mut().choice = Some(*v as u8),
                _ => {}
            }
        })));
        (store, dispatcher)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> Form<Store> {
        Form::new(vec![
            Box::new(Input::<Store, TextAccess>::new("Title")),
            Box::new(RadioGroup::<Store, u8, ChoiceAccess>::new(
                "Choice",
                vec![1, 2, 3],
                vec!["one".to_string(), "two".to_string(), "three".to_string()],
            )),
        ])
    }

    #[test]
    fn input_edits_at_the_cursor() {
        let (store, mut dispatcher) = setup();
        let area = Rect::new(0, 0, 40, 10);
        let mut form = form();
        form.activate(&mut dispatcher, &store);

        for c in "ab中".chars() {
            form.on_key(&mut dispatcher, &store, area, key(KeyCode::Char(c)));
        }
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Left));
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Backspace));
        assert_eq!(store.borrow().text, "a中");

        // cursor sits after "a", in the field under the title line
        assert_eq!(form.get_cursor_position(&store, area), Some((3, 1)));
    }

    #[test]
    fn radio_group_cycles_and_clears() {
        let (store, mut dispatcher) = setup();
        let area = Rect::new(0, 0, 40, 10);
        let mut form = form();
        form.activate(&mut dispatcher, &store);
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Tab));

        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Right));
        assert_eq!(store.borrow().choice, Some(1));
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Left));
        assert_eq!(store.borrow().choice, Some(3));
        form.on_key(&mut dispatcher, &store, area, key(KeyCode::Backspace));
        assert_eq!(store.borrow().choice, None);
    }

    #[test]
    fn enter_dispatches_save() {
        let (store, mut dispatcher) = setup();
        let area = Rect::new(0, 0, 40, 10);
        let mut form = form();
        form.activate(&mut dispatcher, &store);

        let msg = form.on_key(&mut dispatcher, &store, area, key(KeyCode::Enter));
        assert_eq!(msg, Some(Message::Handled));
        assert_eq!(LAST.with(|a| a.borrow().last().cloned()), Some(Action::Save));
    }

    #[test]
    fn renders_steps_and_selection() {
        let (store, mut dispatcher) = setup();
        store.borrow_mut().choice = Some(2);
        let area = Rect::new(0, 0, 30, 6);
        let mut form = form();
        form.activate(&mut dispatcher, &store);

        let mut buf = Buffer::empty(area);
        form.render(&store, area, &mut buf);

        let line = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        };
        assert!(line(0).starts_with("◆ Title"));
        assert!(line(3).starts_with("◇ Choice"));
        assert!(line(4).contains("[x] two"));
        assert!(line(4).contains("[ ] one"));
        assert!(line(5).starts_with("└"));
    }
}
