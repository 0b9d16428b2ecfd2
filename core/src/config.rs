// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jiff::civil::Time;
use serde::de;

use crate::day_letter::DayLetter;
use crate::error::ScheduleError;
use crate::period::{DayTemplate, format_clock, minutes_of_day, parse_clock};

/// The name of the application.
pub const APP_NAME: &str = "classday";

/// File name of the database inside the state directory.
pub const DB_FILE_NAME: &str = "classday.db";

/// Configuration for the schedule builder.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for storing application state.
    pub state_dir: Option<PathBuf>,

    /// Course catalog to use instead of the bundled one.
    pub courses_path: Option<PathBuf>,

    /// Number of periods in a day.
    pub periods: usize,

    /// Day letter to use instead of resolving it from today's date.
    pub day: Option<DayLetter>,

    /// When the first period starts.
    pub start_of_day: ConfigClock,

    /// Length of each lesson in minutes.
    pub lesson_length: u32,

    /// Length of the break between lessons in minutes.
    pub break_length: u32,

    /// Seconds between two live position updates.
    pub poll_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        let template = DayTemplate::DEFAULT;
        Self {
            state_dir: None,
            courses_path: None,
            periods: 9,
            day: None,
            start_of_day: ConfigClock::from_minutes(template.start_of_day),
            lesson_length: template.lesson_length,
            break_length: template.break_length,
            poll_interval: 30,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if self.periods == 0 {
            return Err(ScheduleError::InvalidConfig("periods must be at least 1".into()).into());
        }
        if self.lesson_length == 0 {
            return Err(
                ScheduleError::InvalidConfig("lesson_length must be at least 1".into()).into(),
            );
        }
        if self.poll_interval == 0 {
            return Err(
                ScheduleError::InvalidConfig("poll_interval must be at least 1".into()).into(),
            );
        }

        // Normalize course catalog path
        if let Some(path) = &self.courses_path {
            self.courses_path = Some(
                expand_path(path).map_err(|e| format!("Failed to expand courses path: {e}"))?,
            );
        }

        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        Ok(())
    }

    /// The day template described by this configuration.
    pub fn template(&self) -> DayTemplate {
        DayTemplate {
            start_of_day: self.start_of_day.minutes(),
            lesson_length: self.lesson_length,
            break_length: self.break_length,
        }
    }

    /// The live position polling interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Path of the database, `None` when there is no state directory.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|a| a.join(DB_FILE_NAME))
    }
}

/// A time of day written as `"H:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigClock(Time);

impl ConfigClock {
    fn from_minutes(minutes: u32) -> Self {
        let (h, m) = (minutes / 60 % 24, minutes % 60);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let time = Time::constant(h as i8, m as i8, 0, 0);
        Self(time)
    }

    /// The time of day.
    pub fn time(&self) -> Time {
        self.0
    }

    /// Minutes from midnight.
    pub fn minutes(&self) -> u32 {
        minutes_of_day(self.0)
    }
}

impl fmt::Display for ConfigClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_clock(self.0))
    }
}

impl<'de> serde::Deserialize<'de> for ConfigClock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ClockVisitor;

        impl de::Visitor<'_> for ClockVisitor {
            type Value = ConfigClock;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a time of day like "7:59" or "13:05""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_clock(value)
                    .map(ConfigClock)
                    .ok_or_else(|| de::Error::custom(format!("invalid time of day: {value}")))
            }
        }

        deserializer.deserialize_str(ClockVisitor)
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

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}
