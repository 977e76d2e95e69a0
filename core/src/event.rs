// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::de;

use crate::error::Error;

/// Day of month, 1-31, used as the calendar cell and event lookup key.
pub type DayKey = u32;

/// How events are identified in the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EventKey {
    /// By day number only; saving appends, and the same day number in any
    /// month shows the first stored event.
    #[default]
    Day,

    /// By full calendar date; saving replaces the event of that date.
    Date,
}

impl FromStr for EventKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(EventKey::Day),
            "date" => Ok(EventKey::Date),
            _ => Err(Error::InvalidEventKey(s.to_owned())),
        }
    }
}

impl<'de> serde::Deserialize<'de> for EventKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// How long before the start an event should notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LeadTime {
    #[cfg_attr(feature = "clap", clap(name = "15m"))]
    FifteenMinutes,

    #[cfg_attr(feature = "clap", clap(name = "1h"))]
    OneHour,

    #[cfg_attr(feature = "clap", clap(name = "1d"))]
    OneDay,
}

impl LeadTime {
    pub const ALL: [LeadTime; 3] = [LeadTime::FifteenMinutes, LeadTime::OneHour, LeadTime::OneDay];

    pub fn token(&self) -> &'static str {
        match self {
            LeadTime::FifteenMinutes => "15m",
            LeadTime::OneHour => "1h",
            LeadTime::OneDay => "1d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadTime::FifteenMinutes => "15 mins",
            LeadTime::OneHour => "1 hour",
            LeadTime::OneDay => "1 day",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            LeadTime::FifteenMinutes => Duration::minutes(15),
            LeadTime::OneHour => Duration::hours(1),
            LeadTime::OneDay => Duration::days(1),
        }
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LeadTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadTime::ALL
            .into_iter()
            .find(|a| a.token() == s)
            .ok_or_else(|| Error::InvalidLeadTime(s.to_owned()))
    }
}

/// When a saved event should notify.
///
/// At rest this is a single string: empty when unset, a lead-time token, or an
/// ISO-8601 timestamp for a custom date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    #[default]
    Unset,
    LeadTime(LeadTime),
    At(DateTime<Utc>),
}

impl Notification {
    pub fn is_unset(&self) -> bool {
        matches!(self, Notification::Unset)
    }

    /// The instant to notify for an event starting at `start`.
    pub fn notify_at(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Notification::Unset => None,
            Notification::LeadTime(lead) => Some(start - lead.duration()),
            Notification::At(at) => Some(*at),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Unset => Ok(()),
            Notification::LeadTime(lead) => write!(f, "{lead}"),
            Notification::At(at) => f.write_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl FromStr for Notification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Ok(Notification::Unset)
        } else if let Ok(lead) = s.parse() {
            Ok(Notification::LeadTime(lead))
        } else if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            Ok(Notification::At(at.with_timezone(&Utc)))
        } else {
            Err(Error::InvalidNotification(s.to_owned()))
        }
    }
}

impl serde::Serialize for Notification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Notification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct NotificationVisitor;

        impl de::Visitor<'_> for NotificationVisitor {
            type Value = Notification;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"an empty string, "15m", "1h", "1d" or an ISO-8601 timestamp"#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(NotificationVisitor)
    }
}

/// A saved calendar event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Day of month the event was created on; the lookup key.
    pub date: DayKey,

    /// Month (1-based) the day was picked in.
    pub month: u32,

    /// Year the day was picked in.
    pub year: i32,

    /// The title of the event, never blank once saved.
    pub title: String,

    /// Free-text note, possibly empty.
    pub note: String,

    /// Start of the event, always before `end_time`.
    pub start_time: DateTime<Utc>,

    /// End of the event.
    pub end_time: DateTime<Utc>,

    /// When to notify.
    pub notification: Notification,
}

impl Event {
    /// Whether this event belongs to the given full calendar date.
    pub fn is_on(&self, year: i32, month: u32, day: DayKey) -> bool {
        self.year == year && self.month == month && self.date == day
    }

    pub fn notify_at(&self) -> Option<DateTime<Utc>> {
        self.notification.notify_at(self.start_time)
    }
}
