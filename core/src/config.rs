// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de;

use crate::event::EventKey;
use crate::holiday::{HolidayEntry, default_holidays};

/// The name of the application.
pub const APP_NAME: &str = "daycal";

/// Configuration for the calendar core.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// How long the splash screen stays before switching to the calendar.
    #[serde(default)]
    pub splash_delay: SplashDelay,

    /// How events are keyed in the store.
    #[serde(default)]
    pub event_key: EventKey,

    /// Replacement for the compiled-in holiday table.
    #[serde(default)]
    pub holidays: Option<Vec<HolidayEntry>>,

    /// File receiving log output.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if let Some(path) = &self.log_file {
            self.log_file = Some(
                expand_path(path).map_err(|e| format!("Failed to expand log file path: {e}"))?,
            );
        }

        if let Some(holidays) = &self.holidays {
            for entry in holidays {
                entry.validate()?;
            }
        }

        Ok(())
    }

    /// The configured holiday table, or the compiled-in one.
    pub fn holiday_table(&self) -> Vec<HolidayEntry> {
        match &self.holidays {
            Some(a) => a.clone(),
            None => default_holidays(),
        }
    }
}

/// Delay of the splash screen, defaults to five seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashDelay(pub Duration);

impl Default for SplashDelay {
    fn default() -> Self {
        Self(Duration::from_secs(5))
    }
}

impl<'de> serde::Deserialize<'de> for SplashDelay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DelayVisitor;

        impl de::Visitor<'_> for DelayVisitor {
            type Value = SplashDelay;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(SplashDelay)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DelayVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
fn parse_duration(s: &str) -> Result<Duration, crate::Error> {
    let invalid = || crate::Error::InvalidDuration(s.to_owned());
    let number = |v: &str| v.trim().parse::<u64>().map_err(|_| invalid());
    let secs = |v: &str, unit: u64| number(v)?.checked_mul(unit).ok_or_else(invalid);

    // Try to parse "HH:MM" format
    if let Some((h, m)) = s.split_once(':') {
        let (h, m) = (number(h)?, number(m)?);
        let minutes = h
            .checked_mul(60)
            .and_then(|a| a.checked_add(m))
            .ok_or_else(invalid)?;
        Ok(Duration::from_secs(minutes.checked_mul(60).ok_or_else(invalid)?))
    }
    // Match suffix-based formats
    else if let Some(rest) = s.strip_suffix("d") {
        Ok(Duration::from_secs(secs(rest, 24 * 60 * 60)?))
    } else if let Some(rest) = s.strip_suffix("h") {
        Ok(Duration::from_secs(secs(rest, 60 * 60)?))
    } else if let Some(rest) = s.strip_suffix("ms") {
        Ok(Duration::from_millis(number(rest)?))
    } else if let Some(rest) = s.strip_suffix("m") {
        Ok(Duration::from_secs(secs(rest, 60)?))
    } else if let Some(rest) = s.strip_suffix("s") {
        Ok(Duration::from_secs(number(rest)?))
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayKind;

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/daycal.log"))).unwrap();
            assert_eq!(result, home.join("daycal.log"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute() {
        let absolute_path = PathBuf::from("/tmp/daycal.log");
        let result = expand_path(&absolute_path).unwrap();
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/daycal.log");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }

    #[test]
    fn test_parse_duration_colon_format() {
        assert_eq!(parse_duration("01:30").unwrap(), Duration::from_secs(90 * 60));
        assert_eq!(parse_duration("00:00").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_suffix_format() {
        assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86400));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("45m").unwrap(), Duration::from_secs(2700));
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_duration_invalid_format() {
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("99x").is_err());
        assert!(parse_duration("12:xx").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("12").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_invalid() {
        assert!(parse_duration("1000000000000000000d").is_err());
        assert!(parse_duration("18446744073709551615h").is_err());
        assert!(parse_duration("18446744073709551615:00").is_err());
        assert!(parse_duration("0:18446744073709551615").is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.splash_delay, SplashDelay(Duration::from_secs(5)));
        assert_eq!(config.event_key, EventKey::Day);
        assert_eq!(config.holiday_table().len(), 8);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let config: Config = toml::from_str(
            r#"
splash_delay = "2s"
event_key = "date"
holidays = [{ day = 1, kind = "bank" }, { day = 1, kind = "public" }]
"#,
        )
        .unwrap();
        assert_eq!(config.splash_delay, SplashDelay(Duration::from_secs(2)));
        assert_eq!(config.event_key, EventKey::Date);
        assert_eq!(
            config.holiday_table(),
            vec![
                HolidayEntry::new(1, HolidayKind::Bank),
                HolidayEntry::new(1, HolidayKind::Public),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_values() {
        assert!(toml::from_str::<Config>(r#"event_key = "week""#).is_err());
        assert!(toml::from_str::<Config>(r#"splash_delay = "soon""#).is_err());
        assert!(toml::from_str::<Config>(r#"holidays = [{ day = 2, kind = "x" }]"#).is_err());
    }

    #[test]
    fn test_normalize_rejects_bad_holiday_day() {
        let mut config: Config = toml::from_str(r#"holidays = [{ day = 40, kind = "bank" }]"#).unwrap();
        assert!(config.normalize().is_err());
    }
}
