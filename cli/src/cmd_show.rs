// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use classday_core::{Classday, CourseRecord, DayLetter, LivePosition, ScheduleRow, format_clock};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::{Color, Colorize};

use crate::config::ConfigOverrides;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{
    OutputFormat, arg_day, format_local_time, format_save_status, get_day, progress_bar,
};

const PROGRESS_BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy)]
pub struct CmdShow {
    pub day: Option<DayLetter>,
    pub periods: Option<usize>,
    pub output_format: OutputFormat,
}

impl Default for CmdShow {
    fn default() -> Self {
        Self {
            day: None,
            periods: None,
            output_format: OutputFormat::Table,
        }
    }
}

impl CmdShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the schedule of the day")
            .arg(arg_day())
            .arg(
                arg!(-p --periods <COUNT> "Number of periods to show")
                    .value_parser(value_parser!(usize)),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            day: get_day(matches),
            periods: matches.get_one("periods").copied(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            day: self.day,
            periods: self.periods,
        }
    }

    pub async fn run(self, classday: &Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing schedule...");
        let position = classday.live_position();
        match self.output_format {
            OutputFormat::Table => print_table(classday, &position),
            OutputFormat::Json => print_json(classday, &position)?,
        }
        Ok(())
    }
}

fn print_table(classday: &Classday, position: &LivePosition) {
    println!("{}", format!("Schedule — Day {}", classday.day()).bold());

    let rows: Vec<_> = classday
        .rows()
        .into_iter()
        .map(|row| ShowRow {
            active: position.active_period == Some(row.period.index),
            row,
        })
        .collect();

    let columns = [
        ShowColumn::Number,
        ShowColumn::Time,
        ShowColumn::Title,
        ShowColumn::Details,
    ];
    print!("{}", Table::new(&columns, &rows));

    println!("{}", progress_bar(position.day_progress, PROGRESS_BAR_WIDTH));
    if let Some(status) = format_save_status(classday.save_status()) {
        println!("{status}");
    }
}

fn print_json(classday: &Classday, position: &LivePosition) -> Result<(), Box<dyn Error>> {
    let rows = classday.rows();
    let json = ScheduleJson {
        day: classday.day(),
        active_period: position.active_period.map(|i| i + 1),
        day_progress: position.day_progress,
        has_day_started: position.has_day_started,
        saved_at: classday.store().saved_at().map(format_local_time),
        periods: rows.iter().map(PeriodJson::from).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// A schedule row with its live state.
pub struct ShowRow<'a> {
    pub row: ScheduleRow<'a>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ShowColumn {
    Number,
    Time,
    Title,
    Details,
}

impl<'r> TableColumn<ShowRow<'r>> for ShowColumn {
    fn format<'a>(&self, data: &'a ShowRow<'r>) -> Cow<'a, str> {
        let row = &data.row;
        match self {
            ShowColumn::Number => row.period.number().to_string().into(),
            ShowColumn::Time => row.period.to_string().into(),
            ShowColumn::Title => match (row.course, row.course_id) {
                (Some(course), _) => course.title.as_str().into(),
                (None, Some(id)) => format!("Unknown course ({id})").into(),
                (None, None) => "Free period".into(),
            },
            ShowColumn::Details => match row.course {
                Some(course) => format!("{} · {}", course.dept, course.code).into(),
                None => "".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ShowColumn::Number => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &ShowRow<'r>) -> Option<Color> {
        if data.active {
            return Some(Color::Green);
        }
        match self {
            ShowColumn::Title if data.row.is_unknown_course() => Some(Color::Yellow),
            ShowColumn::Title if data.row.course_id.is_none() => Some(Color::BrightBlack),
            ShowColumn::Details => Some(Color::BrightBlack),
            _ => None,
        }
    }

    fn is_bold(&self, data: &ShowRow<'r>) -> bool {
        data.active
    }
}

#[derive(Debug, serde::Serialize)]
struct ScheduleJson<'a> {
    day: DayLetter,
    active_period: Option<usize>,
    day_progress: f64,
    has_day_started: bool,
    saved_at: Option<String>,
    periods: Vec<PeriodJson<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct PeriodJson<'a> {
    number: usize,
    start: String,
    end: String,
    course_id: Option<&'a str>,
    course: Option<&'a CourseRecord>,
}

impl<'a> From<&ScheduleRow<'a>> for PeriodJson<'a> {
    fn from(row: &ScheduleRow<'a>) -> Self {
        Self {
            number: row.period.number(),
            start: format_clock(row.period.start),
            end: format_clock(row.period.end),
            course_id: row.course_id,
            course: row.course,
        }
    }
}
