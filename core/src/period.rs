// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::civil::{Time, time};

const MINUTES_PER_DAY: u64 = 24 * 60;

/// The fixed shape of a school day: when the first lesson starts, how long
/// lessons last and how long the breaks between them are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTemplate {
    /// Minutes from midnight at which the first period starts.
    pub start_of_day: u32,

    /// Length of each lesson in minutes.
    pub lesson_length: u32,

    /// Length of the break between two lessons in minutes.
    pub break_length: u32,
}

impl DayTemplate {
    /// 7:59, 40 minute lessons, 4 minute breaks.
    pub const DEFAULT: Self = Self {
        start_of_day: 7 * 60 + 59,
        lesson_length: 40,
        break_length: 4,
    };
}

impl Default for DayTemplate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One class slot of the school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// 0-based position in the day.
    pub index: usize,

    /// Start time of day, wrapped into a single day.
    pub start: Time,

    /// End time of day, wrapped into a single day.
    pub end: Time,
}

impl Period {
    /// The period number as shown to users, starting at 1.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Start as minutes from midnight.
    pub fn start_minutes(&self) -> u32 {
        minutes_of_day(self.start)
    }

    /// End as minutes from midnight.
    pub fn end_minutes(&self) -> u32 {
        minutes_of_day(self.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", format_clock(self.start), format_clock(self.end))
    }
}

/// Computes `count` periods laid out by the template.
///
/// Period `i` starts at `start_of_day + i * (lesson_length + break_length)` and
/// lasts `lesson_length` minutes. Times past midnight wrap around, so a
/// period starting at 24:10 is reported as 0:10.
pub fn compute_period_times(count: usize, template: &DayTemplate) -> Vec<Period> {
    let stride = u64::from(template.lesson_length) + u64::from(template.break_length);
    (0..count)
        .map(|index| {
            let start = u64::from(template.start_of_day) + index as u64 * stride;
            let end = start + u64::from(template.lesson_length);
            Period {
                index,
                start: wrap_minutes(start),
                end: wrap_minutes(end),
            }
        })
        .collect()
}

/// Formats a time of day as 24-hour `H:MM`, without padding the hour.
pub fn format_clock(t: Time) -> String {
    format!("{}:{:02}", t.hour(), t.minute())
}

/// Parses a 24-hour `H:MM` or `HH:MM` string.
///
/// Returns `None` unless the hour is within `0..=23` and the minute is
/// exactly two digits within `00..=59`.
pub fn parse_clock(s: &str) -> Option<Time> {
    let (h, m) = s.split_once(':')?;
    let all_digits = |v: &str| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit());
    if h.len() > 2 || m.len() != 2 || !all_digits(h) || !all_digits(m) {
        return None;
    }

    let hour: i8 = h.parse().ok()?;
    let minute: i8 = m.parse().ok()?;
    Time::new(hour, minute, 0, 0).ok()
}

/// Minutes elapsed since midnight, seconds are dropped.
pub fn minutes_of_day(t: Time) -> u32 {
    // hour and minute are always non-negative
    u32::from(t.hour().unsigned_abs()) * 60 + u32::from(t.minute().unsigned_abs())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn wrap_minutes(total: u64) -> Time {
    let total = total % MINUTES_PER_DAY;
    // both parts are bounded by the modulo above
    time((total / 60) as i8, (total % 60) as i8, 0, 0)
}
