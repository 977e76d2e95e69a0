// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Datelike, Local, NaiveDate};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::{Color, Colorize};
use daycal_core::{CalendarView, Config, EventStore, HolidayKind, Marker};
use unicode_width::UnicodeWidthStr;

use crate::util::truncate_to_width;

const CELL_WIDTH: usize = 3;
const MAX_MARKERS: usize = 3;
const WEEKDAYS: &str = "Sun Mon Tue Wed Thu Fri Sat";

#[derive(Debug, Clone, Copy)]
pub struct CmdMonth {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a month with its holiday markers")
            .arg(arg!(--year <YEAR> "Year to show, defaults to the current one").value_parser(value_parser!(i32)))
            .arg(
                arg!(--month <MONTH> "Month to show (1-12), defaults to the current one")
                    .value_parser(value_parser!(u32).range(1..=12)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: matches.get_one("year").copied(),
            month: matches.get_one("month").copied(),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "printing month...");
        let today = Local::now().date_naive();
        let view = self.view(config, today)?;
        println!("{}", render_month(&view, &EventStore::new()));
        Ok(())
    }

    fn view(self, config: &Config, today: NaiveDate) -> Result<CalendarView, Box<dyn Error>> {
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(format!("Unsupported month: {year}-{month:02}").into());
        }

        let offset = (i64::from(year) - i64::from(today.year())) * 12 + i64::from(month)
            - i64::from(today.month());
        let offset = i32::try_from(offset).map_err(|_| format!("Year out of range: {year}"))?;

        let mut view = CalendarView::new(today, config.holiday_table(), config.event_key);
        if offset != 0 {
            view.change_month(offset);
        }
        Ok(view)
    }
}

/// Terminal color of a marker dot.
pub fn marker_color(marker: Marker) -> Color {
    match marker {
        Marker::Holiday(HolidayKind::Public) => Color::Red,
        Marker::Holiday(HolidayKind::Bank) => Color::Blue,
        Marker::Holiday(HolidayKind::Mercantile) => Color::TrueColor {
            r: 0xff,
            g: 0x00,
            b: 0xaa,
        },
        Marker::Event => Color::TrueColor {
            r: 0x93,
            g: 0x00,
            b: 0xff,
        },
    }
}

/// Renders the displayed month of `view` as text: title, weekday header,
/// one line of day numbers and one line of markers per week, a line of
/// event titles for weeks that have events, and a legend.
pub fn render_month(view: &CalendarView, store: &EventStore) -> String {
    let mut lines = Vec::new();
    let title = format!("{:^width$}", view.month_title(), width = WEEKDAYS.len());
    lines.push(title.trim_end().bold().to_string());
    lines.push(WEEKDAYS.bold().to_string());

    for week in view.grid() {
        let mut days = Vec::with_capacity(7);
        let mut markers = Vec::with_capacity(7);
        let mut labels = Vec::with_capacity(7);
        for day in week {
            let Some(day) = day else {
                days.push(" ".repeat(CELL_WIDTH));
                markers.push(" ".repeat(CELL_WIDTH));
                labels.push(" ".repeat(CELL_WIDTH));
                continue;
            };

            let text = format!("{day:>CELL_WIDTH$}");
            days.push(match view.is_today(day) {
                true => text.yellow().bold().to_string(),
                false => text,
            });

            let dots = view.markers_for_day(store, day);
            let shown = dots.len().min(MAX_MARKERS);
            let mut cell = " ".repeat(CELL_WIDTH - shown);
            for marker in dots.into_iter().take(MAX_MARKERS) {
                cell.push_str(&"●".color(marker_color(marker)).to_string());
            }
            markers.push(cell);

            let title = view.event_for_day(store, day).map(|e| e.title.as_str());
            let label = truncate_to_width(title.unwrap_or_default(), CELL_WIDTH);
            let fill = " ".repeat(CELL_WIDTH - label.width());
            labels.push(format!("{label}{fill}").color(marker_color(Marker::Event)).to_string());
        }
        lines.push(days.join(" ").trim_end().to_string());
        lines.push(markers.join(" ").trim_end().to_string());
        if week.iter().flatten().any(|&day| view.has_event(store, day)) {
            lines.push(labels.join(" ").trim_end().to_string());
        }
    }

    lines.push(legend());
    lines.join("\n")
}

fn legend() -> String {
    [
        Marker::Holiday(HolidayKind::Public),
        Marker::Holiday(HolidayKind::Bank),
        Marker::Holiday(HolidayKind::Mercantile),
        Marker::Event,
    ]
    .into_iter()
    .map(|marker| {
        let label = match marker {
            Marker::Holiday(kind) => kind.label(),
            Marker::Event => "Event",
        };
        format!("{} {}", "●".color(marker_color(marker)), label)
    })
    .collect::<Vec<_>>()
    .join("  ")
}
