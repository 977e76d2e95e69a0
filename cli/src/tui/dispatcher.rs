// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;
use daycal_core::LeadTime;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching action");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A key was pressed on the splash screen.
    SkipSplash,
    /// The splash delay ran out.
    SplashElapsed,
    /// The local date as of now, refreshes "today".
    Tick(NaiveDate),

    ChangeMonth(i32),
    MoveSelection(i64),
    /// Opens the editor for the selected day.
    PressDay,

    UpdateTitle(String),
    UpdateNote(String),
    UpdateStartTime(String),
    UpdateEndTime(String),
    SelectLeadTime(Option<LeadTime>),
    UpdateCustomDate(String),
    Save,

    /// Leaves the editor without saving.
    Back,
}
