// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, time::Instant};

use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app_store::AppStore;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 100;

/// The welcome screen shown while the app starts.
pub struct Splash {
    started: Instant,
}

impl Splash {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn spinner(&self) -> &'static str {
        let frame = self.started.elapsed().as_millis() / SPINNER_FRAME_MS;
        SPINNER[(frame % SPINNER.len() as u128) as usize]
    }
}

impl Component<AppStore> for Splash {
    fn render(&self, _store: &RefCell<AppStore>, area: Rect, buf: &mut Buffer) {
        let [_, title, spinner, hint, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new("Calendar App".bold().magenta())
            .centered()
            .render(title, buf);
        Paragraph::new(self.spinner().magenta())
            .centered()
            .render(spinner, buf);
        Paragraph::new("press any key to continue".dark_gray())
            .centered()
            .render(hint, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &RefCell<AppStore>,
        _area: Rect,
        _event: KeyEvent,
    ) -> Option<Message> {
        dispatcher.dispatch(Action::SkipSplash);
        Some(Message::Handled)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, _store: &RefCell<AppStore>) {
        self.started = Instant::now();
    }
}
