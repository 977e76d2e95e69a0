// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Errors raised while parsing calendar values from strings.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not one of the lead-time tokens `15m`, `1h` or `1d`.
    InvalidLeadTime(String),

    /// Neither a lead-time token nor an ISO-8601 timestamp.
    InvalidNotification(String),

    /// Not one of `public`, `bank` or `mercantile`.
    InvalidHolidayKind(String),

    /// Not one of `day` or `date`.
    InvalidEventKey(String),

    /// Malformed duration in the configuration.
    InvalidDuration(String),

    /// Holiday entry outside of 1..=31.
    InvalidHolidayDay(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLeadTime(s) => {
                write!(f, "Invalid lead time: {s:?}, expected one of 15m, 1h, 1d")
            }
            Self::InvalidNotification(s) => write!(
                f,
                "Invalid notification: {s:?}, expected a lead time or an ISO-8601 timestamp"
            ),
            Self::InvalidHolidayKind(s) => write!(
                f,
                "Invalid holiday kind: {s:?}, expected one of public, bank, mercantile"
            ),
            Self::InvalidEventKey(s) => {
                write!(f, "Invalid event key: {s:?}, expected one of day, date")
            }
            Self::InvalidDuration(s) => write!(f, "Invalid duration format: {s}"),
            Self::InvalidHolidayDay(d) => write!(f, "Invalid holiday day: {d}, expected 1-31"),
        }
    }
}

impl std::error::Error for Error {}
