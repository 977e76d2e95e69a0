// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use daycal_core::{Event, LeadTime, Marker, Notification};

use crate::cmd_month::marker_color;
use crate::table::{Table, TableColumn};
use crate::util::{ArgOutputFormat, format_datetime, format_time};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Date,
                EventColumn::TimeRange,
                EventColumn::Title,
                EventColumn::Notification,
                EventColumn::Note,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                #[derive(serde::Serialize)]
                struct EventsState<'a> {
                    events: &'a [Event],
                }

                let state = EventsState {
                    events: self.events,
                };
                let json = serde_json::to_string_pretty(&state).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            ArgOutputFormat::Table if self.events.is_empty() => write!(f, "No events saved"),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Date,
    TimeRange,
    Title,
    Notification,
    Note,
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Date => "Date",
            EventColumn::TimeRange => "Time",
            EventColumn::Title => "Title",
            EventColumn::Notification => "Notify",
            EventColumn::Note => "Note",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Date => {
                format!("{:04}-{:02}-{:02}", event.year, event.month, event.date).into()
            }
            EventColumn::TimeRange => format!(
                "{}~{}",
                format_time(&event.start_time),
                format_time(&event.end_time)
            )
            .into(),
            EventColumn::Title => event.title.as_str().into(),
            EventColumn::Notification => format_notification(&event.notification),
            EventColumn::Note => event.note.as_str().into(),
        }
    }

    fn color(&self, _event: &Event) -> Option<Color> {
        match self {
            EventColumn::Title => Some(marker_color(Marker::Event)),
            _ => None,
        }
    }
}

/// Human readable notification: a lead time label or the custom local date.
pub fn format_notification(notification: &Notification) -> Cow<'static, str> {
    match notification {
        Notification::Unset => "".into(),
        Notification::LeadTime(lead) => format_lead_time(*lead).into(),
        Notification::At(at) => format_datetime(at).into(),
    }
}

fn format_lead_time(lead: LeadTime) -> &'static str {
    match lead {
        LeadTime::FifteenMinutes => "15 mins before",
        LeadTime::OneHour => "1 hour before",
        LeadTime::OneDay => "1 day before",
    }
}
