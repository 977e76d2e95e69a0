// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc, time::Duration, time::Instant};

use chrono::Local;
use daycal_core::{Config, Event, EventStore};
use ratatui::crossterm::event::{self, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::{DefaultTerminal, Frame};

use crate::tui::app_store::{AppStore, Screen};
use crate::tui::calendar::{MonthGrid, new_calendar};
use crate::tui::component::{Component, Message};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_editor::{EventEditor, new_event_editor};
use crate::tui::splash::Splash;

const SPLASH_POLL: Duration = Duration::from_millis(100);
const CLOCK_POLL: Duration = Duration::from_secs(60);

/// Runs the calendar app until the user quits, returns the events saved
/// during the session.
pub fn run_calendar(config: &Config, splash: bool) -> Result<Vec<Event>, Box<dyn Error>> {
    let mut config = config.clone();
    if !splash {
        config.splash_delay.0 = Duration::ZERO;
    }

    let events = Rc::new(RefCell::new(EventStore::new()));
    let today = Local::now().date_naive();
    let store = Rc::new(RefCell::new(AppStore::new(&config, today, events.clone())));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        AppStore::register_to(store.clone(), &mut dispatcher);
        let mut app = App::new(&mut dispatcher, &store);
        app.run(&mut dispatcher, &store, &mut terminal)
    }; // release dispatcher and app here to avoid borrow conflicts
    ratatui::restore();
    result?;

    drop(store);
    let events = Rc::try_unwrap(events)
        .map_err(|_| "Event store still has references")?
        .into_inner();
    tracing::debug!(count = events.len(), "calendar closed");
    Ok(events.events().to_vec())
}

/// Routes keys and rendering to the component of the active screen.
struct App {
    screen: Screen,
    splash: Splash,
    calendar: SinglePage<AppStore, MonthGrid>,
    editor: SinglePage<AppStore, EventEditor>,
    started: Instant,
    clock: Clock,
}

impl App {
    fn new(dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) -> Self {
        let mut app = Self {
            screen: store.borrow().screen,
            splash: Splash::new(),
            calendar: new_calendar(),
            editor: new_event_editor(),
            started: Instant::now(),
            clock: Clock::new(Instant::now(), CLOCK_POLL),
        };
        app.active().activate(dispatcher, store);
        app
    }

    fn run(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        terminal: &mut DefaultTerminal,
    ) -> Result<(), Box<dyn Error>> {
        loop {
            terminal.draw(|frame| self.draw(store, frame))?;

            let timeout = self.poll_timeout(store);
            if event::poll(timeout)? {
                if let event::Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                    && let Some(Message::Exit) = self.on_key(dispatcher, store, terminal, key)?
                {
                    break Ok(());
                }
            } else if self.screen == Screen::Splash
                && self.started.elapsed() >= store.borrow().splash_delay
            {
                dispatcher.dispatch(Action::SplashElapsed);
            }

            // ticks even while keys keep arriving
            if self.screen != Screen::Splash && self.clock.due(Instant::now()) {
                dispatcher.dispatch(Action::Tick(Local::now().date_naive()));
            }
            self.sync_screen(dispatcher, store);
        }
    }

    fn draw(&self, store: &RefCell<AppStore>, frame: &mut Frame) {
        let area = frame.area();
        let active = self.active_ref();
        active.render(store, area, frame.buffer_mut());

        if let Some(cursor_pos) = active.get_cursor_position(store, area) {
            frame.set_cursor_position(cursor_pos);
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<AppStore>,
        terminal: &DefaultTerminal,
        key: KeyEvent,
    ) -> Result<Option<Message>, Box<dyn Error>> {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let msg = self.active().on_key(dispatcher, store, area, key);
        match (self.screen, msg) {
            // leaving the editor returns to the calendar rather than quitting
            (Screen::Editor, Some(Message::Exit)) => {
                dispatcher.dispatch(Action::Back);
                Ok(Some(Message::Handled))
            }
            (_, msg) => Ok(msg),
        }
    }

    /// Swaps the active component when an action moved to another screen.
    fn sync_screen(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<AppStore>) {
        let screen = store.borrow().screen;
        if screen != self.screen {
            tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");
            self.active().deactivate(dispatcher, store);
            self.screen = screen;
            self.active().activate(dispatcher, store);
        }
    }

    fn poll_timeout(&self, store: &RefCell<AppStore>) -> Duration {
        match self.screen {
            Screen::Splash => {
                let remaining = store
                    .borrow()
                    .splash_delay
                    .saturating_sub(self.started.elapsed());
                remaining.min(SPLASH_POLL)
            }
            _ => self.clock.remaining(Instant::now()),
        }
    }

    fn active(&mut self) -> &mut dyn Component<AppStore> {
        match self.screen {
            Screen::Splash => &mut self.splash,
            Screen::Calendar => &mut self.calendar,
            Screen::Editor => &mut self.editor,
        }
    }

    fn active_ref(&self) -> &dyn Component<AppStore> {
        match self.screen {
            Screen::Splash => &self.splash,
            Screen::Calendar => &self.calendar,
            Screen::Editor => &self.editor,
        }
    }
}

/// Fires once per period, however often it is polled.
#[derive(Debug, Clone, Copy)]
struct Clock {
    last: Instant,
    every: Duration,
}

impl Clock {
    fn new(now: Instant, every: Duration) -> Self {
        Self { last: now, every }
    }

    /// Whether a full period has passed since the last firing. Restarts the
    /// period when it has.
    fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.every {
            self.last = now;
            true
        } else {
            false
        }
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.every.saturating_sub(now.saturating_duration_since(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_fires_once_per_period() {
        let start = Instant::now();
        let mut clock = Clock::new(start, CLOCK_POLL);

        // keys arriving every few seconds never reach the poll timeout
        for secs in (0..60).step_by(5) {
            assert!(!clock.due(start + Duration::from_secs(secs)));
        }
        assert!(clock.due(start + Duration::from_secs(61)));
        assert!(!clock.due(start + Duration::from_secs(62)));
        assert!(clock.due(start + Duration::from_secs(121)));
    }

    #[test]
    fn clock_remaining_shrinks_until_due() {
        let start = Instant::now();
        let clock = Clock::new(start, CLOCK_POLL);
        assert_eq!(clock.remaining(start), CLOCK_POLL);
        assert_eq!(
            clock.remaining(start + Duration::from_secs(45)),
            Duration::from_secs(15)
        );
        assert_eq!(clock.remaining(start + Duration::from_secs(90)), Duration::ZERO);
    }
}
