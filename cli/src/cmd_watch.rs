// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classday_core::{Classday, DayLetter, LivePosition, ScheduleRow};
use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::Zoned;

use crate::config::ConfigOverrides;
use crate::util::{arg_day, get_day, progress_bar};

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct CmdWatch {
    pub day: Option<DayLetter>,
}

impl CmdWatch {
    pub const NAME: &str = "watch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("w")
            .about("Follow the current period until interrupted")
            .arg(arg_day())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            day: get_day(matches),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            day: self.day,
            periods: None,
        }
    }

    pub async fn run(self, classday: &Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "watching live position...");
        let tracker = classday.track();
        let mut rx = tracker.subscribe();
        let rows = classday.rows();

        print_position(&rows, &tracker.current());
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let position = *rx.borrow_and_update();
                    print_position(&rows, &position);
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    tracing::debug!("interrupted, stopping live tracker");
                    break;
                }
            }
        }

        tracker.stop();
        Ok(())
    }
}

fn print_position(rows: &[ScheduleRow<'_>], position: &LivePosition) {
    let now = Zoned::now();
    println!(
        "{} {}  {}",
        format!("[{}:{:02}]", now.hour(), now.minute()).dimmed(),
        describe(rows, position),
        progress_bar(position.day_progress, PROGRESS_BAR_WIDTH),
    );
}

/// One line describing where the day stands.
fn describe(rows: &[ScheduleRow<'_>], position: &LivePosition) -> String {
    let Some(row) = position.active_period.and_then(|i| rows.get(i)) else {
        return if !position.has_day_started {
            "Before school".to_string()
        } else if position.day_progress >= 1.0 {
            "School's out".to_string()
        } else {
            "Passing time".to_string()
        };
    };

    let title = match (row.course, row.course_id) {
        (Some(course), _) => course.title.as_str(),
        (None, Some(id)) => id,
        (None, None) => "Free period",
    };
    format!(
        "Period {} · {} (until {})",
        row.period.number(),
        title.bold(),
        classday_core::format_clock(row.period.end)
    )
}
