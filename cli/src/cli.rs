// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use daycal_core::{APP_NAME, Config};

use crate::cmd_calendar::CmdCalendar;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_holidays::CmdHolidays;
use crate::cmd_month::CmdMonth;
use crate::config::parse_config;
use crate::logging::init_tracing;

/// Run the daycal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A month calendar with holiday markers and per-day events.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to calendar
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/daycal/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/daycal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .args(CmdCalendar::args())
            .subcommand(CmdCalendar::command())
            .subcommand(CmdMonth::command())
            .subcommand(CmdHolidays::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdCalendar::NAME, matches)) => Calendar(CmdCalendar::from(matches)),
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some((CmdHolidays::NAME, matches)) => Holidays(CmdHolidays::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Calendar(CmdCalendar::from(&matches)),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Open the calendar
    Calendar(CmdCalendar),

    /// Print a month
    Month(CmdMonth),

    /// List the holiday table
    Holidays(CmdHolidays),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Calendar(a) => Self::run_with(config, true, |x| a.run(x)).await,
            Month(a)    => Self::run_with(config, false, |x| a.run(x)).await,
            Holidays(a) => Self::run_with(config, false, |x| a.run(x)).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    /// Loads the configuration and sets up logging before running `f`.
    /// `owns_screen` keeps log output off the terminal while the TUI draws.
    async fn run_with<F>(config: Option<PathBuf>, owns_screen: bool, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&Config) -> Result<(), Box<dyn Error>>,
    {
        let config = parse_config(config).await?;
        init_tracing(config.log_file.as_deref(), owns_screen)?;
        tracing::debug!(?config, "configuration loaded");
        f(&config)
    }
}
