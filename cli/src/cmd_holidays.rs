// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, error::Error, fmt};

use clap::{ArgMatches, Command};
use colored::Color;
use daycal_core::{Config, HolidayEntry, Marker};

use crate::cmd_month::marker_color;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdHolidays {
    pub output_format: ArgOutputFormat,
}

impl CmdHolidays {
    pub const NAME: &str = "holidays";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the holiday table")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing holidays...");
        let holidays = config.holiday_table();
        println!("{}", HolidaysDisplay::new(&holidays, self.output_format));
        Ok(())
    }
}

struct HolidaysDisplay<'a> {
    holidays: &'a [HolidayEntry],
    format: ArgOutputFormat,
}

impl<'a> HolidaysDisplay<'a> {
    fn new(holidays: &'a [HolidayEntry], format: ArgOutputFormat) -> Self {
        Self { holidays, format }
    }
}

impl fmt::Display for HolidaysDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const COLUMNS: [HolidayColumn; 3] =
            [HolidayColumn::Day, HolidayColumn::Kind, HolidayColumn::Label];

        match self.format {
            ArgOutputFormat::Json => {
                #[derive(serde::Serialize)]
                struct HolidaysState<'a> {
                    holidays: &'a [HolidayEntry],
                }

                let state = HolidaysState {
                    holidays: self.holidays,
                };
                let json = serde_json::to_string_pretty(&state).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            ArgOutputFormat::Table if self.holidays.is_empty() => write!(f, "No holidays"),
            ArgOutputFormat::Table => write!(f, "{}", Table::new(&COLUMNS, self.holidays)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum HolidayColumn {
    Day,
    Kind,
    Label,
}

impl TableColumn<HolidayEntry> for HolidayColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            HolidayColumn::Day => "Day",
            HolidayColumn::Kind => "Kind",
            HolidayColumn::Label => "Label",
        }
        .into()
    }

    fn format<'a>(&self, entry: &'a HolidayEntry) -> Cow<'a, str> {
        match self {
            HolidayColumn::Day => entry.day.to_string().into(),
            HolidayColumn::Kind => entry.kind.to_string().into(),
            HolidayColumn::Label => entry.kind.label().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            HolidayColumn::Day => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, entry: &HolidayEntry) -> Option<Color> {
        match self {
            HolidayColumn::Label => Some(marker_color(Marker::Holiday(entry.kind))),
            _ => None,
        }
    }
}
