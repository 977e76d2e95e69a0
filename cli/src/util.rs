// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;

use chrono::{DateTime, Local, TimeZone};
use clap::{Arg, ArgMatches, arg, value_parser};
use daycal_core::{DATETIME_FORMAT, TIME_FORMAT};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Formats the wall-clock time in the local timezone, e.g. `09:15`.
pub fn format_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Formats the date and time in the local timezone, e.g. `2026-10-15 09:15`.
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Local).format(DATETIME_FORMAT).to_string()
}

/// Number of grapheme clusters in `s`.
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width of the first `n` grapheme clusters of `s`.
pub fn unicode_width_of_graphemes(s: &str, n: usize) -> usize {
    s[..byte_offset_of_grapheme(s, n)].width()
}

/// Byte offset where the grapheme cluster at index `g_idx` starts, or the
/// length of `s` if out of bounds.
pub fn byte_offset_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

/// The longest prefix of `s`, in whole grapheme clusters, that fits in `width` columns.
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, g) in s.grapheme_indices(true) {
        used += g.width();
        if used > width {
            return &s[..i];
        }
    }
    s
}
