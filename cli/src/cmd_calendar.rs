// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgAction, ArgMatches, Command, arg};
use daycal_core::Config;

use crate::event_formatter::EventFormatter;
use crate::tui;
use crate::util::ArgOutputFormat;

/// Runs the calendar app, then prints the events saved in the session.
#[derive(Debug, Clone, Copy)]
pub struct CmdCalendar {
    pub splash: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Open the calendar (default)")
            .args(Self::args())
    }

    /// Also accepted by the top-level command, which runs the calendar
    /// when no subcommand is given.
    pub fn args() -> [clap::Arg; 2] {
        [
            arg!(--"no-splash" "Skip the splash screen").action(ArgAction::SetTrue),
            ArgOutputFormat::arg(),
        ]
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            splash: !matches.get_flag("no-splash"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening calendar...");
        let events = tui::run_calendar(config, self.splash)?;

        let formatter = EventFormatter::new().with_output_format(self.output_format);
        println!("{}", formatter.format(&events));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar() {
        let cmd = Command::new("test").subcommand(CmdCalendar::command());
        let matches = cmd
            .try_get_matches_from(["test", "calendar", "--no-splash", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("calendar").unwrap();
        let parsed = CmdCalendar::from(sub_matches);
        assert!(!parsed.splash);
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn test_parse_calendar_defaults() {
        let cmd = Command::new("test").subcommand(CmdCalendar::command());
        let matches = cmd.try_get_matches_from(["test", "cal"]).unwrap();
        let sub_matches = matches.subcommand_matches("calendar").unwrap();
        let parsed = CmdCalendar::from(sub_matches);
        assert!(parsed.splash);
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }
}
