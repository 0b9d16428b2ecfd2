// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classday_core::{Classday, DayLetter};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::config::ConfigOverrides;
use crate::util::{arg_day, format_save_status, get_day};

#[derive(Debug, Clone)]
pub struct CmdAssign {
    pub period: usize,
    pub course: String,
    pub day: Option<DayLetter>,
}

impl CmdAssign {
    pub const NAME: &str = "assign";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("a")
            .about("Assign a course to a period")
            .arg(arg_period())
            .arg(arg!(course: <COURSE> "The course id, see `courses` for the list"))
            .arg(arg_day())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            period: get_period(matches),
            course: matches
                .get_one::<String>("course")
                .expect("course is required")
                .clone(),
            day: get_day(matches),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            day: self.day,
            periods: None,
        }
    }

    pub async fn run(self, classday: &mut Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "assigning course...");
        let index = period_index(self.period)?;
        classday.assign(index, &self.course).await?;

        let title = classday
            .catalog()
            .find(&self.course)
            .map_or(self.course.as_str(), |c| c.title.as_str());
        println!(
            "Assigned {} to period {} (Day {})",
            title.bold(),
            self.period,
            classday.day()
        );
        print_save_status(classday);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdRemove {
    pub period: usize,
    pub day: Option<DayLetter>,
}

impl CmdRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Remove the course of a period")
            .arg(arg_period())
            .arg(arg_day())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            period: get_period(matches),
            day: get_day(matches),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            day: self.day,
            periods: None,
        }
    }

    pub async fn run(self, classday: &mut Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "removing course...");
        let index = period_index(self.period)?;
        classday.remove(index).await?;

        println!("Cleared period {} (Day {})", self.period, classday.day());
        print_save_status(classday);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdClear {
    pub day: Option<DayLetter>,
}

impl CmdClear {
    pub const NAME: &str = "clear";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Remove every course of the day")
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

    pub async fn run(self, classday: &mut Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "clearing schedule...");
        classday.clear_all().await;

        println!("Cleared all periods (Day {})", classday.day());
        print_save_status(classday);
        Ok(())
    }
}

fn arg_period() -> Arg {
    arg!(period: <PERIOD> "The period number, starting at 1").value_parser(value_parser!(usize))
}

fn get_period(matches: &ArgMatches) -> usize {
    matches
        .get_one::<usize>("period")
        .copied()
        .expect("period is required")
}

/// Converts a period number as displayed into a 0-based index.
fn period_index(period: usize) -> Result<usize, Box<dyn Error>> {
    period
        .checked_sub(1)
        .ok_or_else(|| "Period numbers start at 1".into())
}

fn print_save_status(classday: &Classday) {
    if let Some(status) = format_save_status(classday.save_status()) {
        println!("{status}");
    }
}
