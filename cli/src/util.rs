// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use classday_core::{DayLetter, SaveStatus};
use clap::{Arg, ArgMatches, arg, value_parser};
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

pub fn arg_day() -> Arg {
    arg!(-d --day <DAY> "Day letter to use instead of today's")
        .value_parser(value_parser!(DayLetter))
}

pub fn get_day(matches: &ArgMatches) -> Option<DayLetter> {
    matches.get_one("day").copied()
}

/// Formats a timestamp as local `H:MM`.
pub fn format_local_time(at: Timestamp) -> String {
    let zoned = at.to_zoned(TimeZone::system());
    format!("{}:{:02}", zoned.hour(), zoned.minute())
}

/// The save indicator, `None` when nothing was saved in this session.
pub fn format_save_status(status: &SaveStatus) -> Option<String> {
    match status {
        SaveStatus::Never => None,
        SaveStatus::Saved { at } => {
            let text = format!("Saved {}", format_local_time(*at));
            Some(text.dimmed().to_string())
        }
        SaveStatus::Unsaved { reason, .. } => Some(format!("{} {reason}", "Not saved:".red())),
    }
}

/// Renders a progress bar of `width` cells.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn progress_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = ((progress * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        (progress * 100.0).round() as u32
    )
}
