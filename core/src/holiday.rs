// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use serde::de;

use crate::error::Error;
use crate::event::DayKey;

/// The kind of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HolidayKind {
    /// Public holiday.
    Public,

    /// Bank holiday.
    Bank,

    /// Mercantile holiday.
    Mercantile,
}

impl HolidayKind {
    pub fn label(&self) -> &'static str {
        match self {
            HolidayKind::Public => "Public Holiday",
            HolidayKind::Bank => "Bank Holiday",
            HolidayKind::Mercantile => "Mercantile Holiday",
        }
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HolidayKind::Public => "public",
            HolidayKind::Bank => "bank",
            HolidayKind::Mercantile => "mercantile",
        };
        f.write_str(s)
    }
}

impl FromStr for HolidayKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(HolidayKind::Public),
            "bank" => Ok(HolidayKind::Bank),
            "mercantile" => Ok(HolidayKind::Mercantile),
            _ => Err(Error::InvalidHolidayKind(s.to_owned())),
        }
    }
}

impl serde::Serialize for HolidayKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HolidayKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A static holiday, repeated on the same day of every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HolidayEntry {
    /// Day of month, 1-31.
    pub day: DayKey,

    /// The kind of the holiday.
    pub kind: HolidayKind,
}

impl HolidayEntry {
    pub const fn new(day: DayKey, kind: HolidayKind) -> Self {
        Self { day, kind }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        match self.day {
            1..=31 => Ok(()),
            d => Err(Error::InvalidHolidayDay(d)),
        }
    }
}

/// NOTE: order matters, markers are drawn in table order.
pub const DEFAULT_HOLIDAYS: [HolidayEntry; 8] = [
    HolidayEntry::new(4, HolidayKind::Public),
    HolidayEntry::new(10, HolidayKind::Bank),
    HolidayEntry::new(15, HolidayKind::Mercantile),
    HolidayEntry::new(25, HolidayKind::Public),
    HolidayEntry::new(4, HolidayKind::Mercantile),
    HolidayEntry::new(10, HolidayKind::Bank),
    HolidayEntry::new(25, HolidayKind::Mercantile),
    HolidayEntry::new(15, HolidayKind::Public),
];

/// The compiled-in holiday table.
pub fn default_holidays() -> Vec<HolidayEntry> {
    DEFAULT_HOLIDAYS.to_vec()
}

/// All kinds whose entry falls on `day`, in table order, duplicates preserved.
pub fn holiday_types_for_day(table: &[HolidayEntry], day: DayKey) -> Vec<HolidayKind> {
    table
        .iter()
        .filter(|h| h.day == day)
        .map(|h| h.kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_holiday_kind() {
        assert_eq!("public".parse(), Ok(HolidayKind::Public));
        assert_eq!(" Bank ".parse(), Ok(HolidayKind::Bank));
        assert_eq!("MERCANTILE".parse(), Ok(HolidayKind::Mercantile));
        assert!("national".parse::<HolidayKind>().is_err());
    }

    #[test]
    fn default_table_has_pairs() {
        let table = default_holidays();
        assert_eq!(table.len(), 8);
        for day in [4, 10, 15, 25] {
            assert_eq!(holiday_types_for_day(&table, day).len(), 2, "day {day}");
        }
    }

    #[test]
    fn keeps_duplicates() {
        let table = default_holidays();
        assert_eq!(
            holiday_types_for_day(&table, 10),
            vec![HolidayKind::Bank, HolidayKind::Bank]
        );
    }

    #[test]
    fn rejects_out_of_range_day() {
        assert!(HolidayEntry::new(0, HolidayKind::Bank).validate().is_err());
        assert!(HolidayEntry::new(32, HolidayKind::Bank).validate().is_err());
        assert!(HolidayEntry::new(31, HolidayKind::Bank).validate().is_ok());
    }
}
