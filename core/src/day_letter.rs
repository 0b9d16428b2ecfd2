// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::Zoned;
use jiff::civil::Date;

/// Which of the two alternating schedule templates applies on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DayLetter {
    /// A day.
    #[serde(alias = "a")]
    #[cfg_attr(feature = "clap", clap(name = "A", alias = "a"))]
    A,

    /// B day.
    #[serde(alias = "b")]
    #[cfg_attr(feature = "clap", clap(name = "B", alias = "b"))]
    B,
}

/// The cycle is indexed by the day offset from today, so offset 0 (today)
/// maps to `B` and offset 1 (tomorrow) maps to `A`.
const DAY_CYCLE: [DayLetter; 2] = [DayLetter::B, DayLetter::A];

impl DayLetter {
    /// Resolves the letter of `target` relative to `today`.
    ///
    /// Only the calendar dates matter. Any offset, however far in the past or
    /// future, yields a letter.
    pub fn resolve(target: Date, today: Date) -> Self {
        let days = i64::from((target - today).get_days());
        let len = DAY_CYCLE.len() as i64;
        let index = ((days % len) + len) % len;
        match index {
            0 => DAY_CYCLE[0],
            _ => DAY_CYCLE[1],
        }
    }

    /// Resolves the letter of `target` relative to the current local date.
    pub fn for_date(target: Date) -> Self {
        Self::resolve(target, Zoned::now().date())
    }

    /// The letter of the current local date.
    pub fn today() -> Self {
        let today = Zoned::now().date();
        Self::resolve(today, today)
    }

    /// The other letter of the cycle.
    pub fn other(self) -> Self {
        match self {
            DayLetter::A => DayLetter::B,
            DayLetter::B => DayLetter::A,
        }
    }

    /// The letter as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            DayLetter::A => "A",
            DayLetter::B => "B",
        }
    }
}

impl fmt::Display for DayLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(DayLetter::A),
            "B" | "b" => Ok(DayLetter::B),
            other => Err(format!("Invalid day letter: {other}, expected A or B")),
        }
    }
}
