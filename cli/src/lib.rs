// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface and terminal UI of daycal.

mod cli;
mod cmd_calendar;
mod cmd_generate_completion;
mod cmd_holidays;
mod cmd_month;
mod config;
mod event_formatter;
mod logging;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
