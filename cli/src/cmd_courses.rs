// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::error::Error;

use classday_core::{Classday, CourseRecord};
use clap::{ArgMatches, Command, arg};
use colored::Color;

use crate::table::{Table, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdCourses {
    pub query: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdCourses {
    pub const NAME: &str = "courses";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("c")
            .about("List or search the course catalog")
            .arg(arg!(query: [QUERY] "Filter by id, title, department or code"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            query: matches.get_one::<String>("query").cloned(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, classday: &Classday) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing courses...");
        let courses = classday.search_courses(self.query.as_deref().unwrap_or_default());
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&courses)?),
            OutputFormat::Table if courses.is_empty() => println!("No matching courses"),
            OutputFormat::Table => {
                let columns = [
                    CourseColumn::Id,
                    CourseColumn::Dept,
                    CourseColumn::Code,
                    CourseColumn::Title,
                ];
                print!("{}", Table::new(&columns, &courses));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CourseColumn {
    Id,
    Dept,
    Code,
    Title,
}

impl<'r> TableColumn<&'r CourseRecord> for CourseColumn {
    fn format<'a>(&self, data: &'a &'r CourseRecord) -> Cow<'a, str> {
        match self {
            CourseColumn::Id => data.id.as_str().into(),
            CourseColumn::Dept => data.dept.as_str().into(),
            CourseColumn::Code => data.code.as_str().into(),
            CourseColumn::Title if data.ap_flag => format!("{} (AP)", data.title).into(),
            CourseColumn::Title => data.title.as_str().into(),
        }
    }

    fn color(&self, _data: &&'r CourseRecord) -> Option<Color> {
        match self {
            CourseColumn::Id => Some(Color::Cyan),
            CourseColumn::Dept | CourseColumn::Code => Some(Color::BrightBlack),
            CourseColumn::Title => None,
        }
    }
}
