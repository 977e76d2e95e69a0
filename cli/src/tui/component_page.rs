// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::Block;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;

/// A rounded frame with a centered title and key hints at the bottom.
pub struct SinglePage<S, C: Component<S>> {
    title: String,
    instructions: Vec<(&'static str, &'static str)>,
    inner: C,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, C: Component<S>> SinglePage<S, C> {
    pub fn new(title: impl ToString, inner: C) -> Self {
        Self {
            title: title.to_string(),
            instructions: Vec::new(),
            inner,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Key hints as `(label, key)` pairs, e.g. `("Exit", "<Esc>")`.
    pub fn with_instructions(mut self, instructions: Vec<(&'static str, &'static str)>) -> Self {
        self.instructions = instructions;
        self
    }

    fn block(&self) -> Block<'_> {
        Block::bordered().border_set(border::ROUNDED)
    }

    fn instructions(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::with_capacity(self.instructions.len() * 2 + 1);
        for (label, key) in &self.instructions {
            spans.push(format!(" {label} ").into());
            spans.push((*key).blue().bold());
        }
        spans.push(" ".into());
        Line::from(spans)
    }
}

impl<S, C: Component<S>> Component<S> for SinglePage<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let title = Line::from(format!(" {} ", self.title).bold());
        let block = self
            .block()
            .title(title.centered())
            .title_bottom(self.instructions().centered())
            .white();

        let inner_area = block.inner(area);
        block.render(area, buf);
        self.inner.render(store, inner_area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let inner_area = self.block().inner(area);
        self.inner.get_cursor_position(store, inner_area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let inner_area = self.block().inner(area);
        if let Some(msg) = self.inner.on_key(dispatcher, store, inner_area, event) {
            return Some(msg);
        }

        match event.code {
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.deactivate(dispatcher, store);
    }
}
