// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use tokio::fs;

use crate::config::Config;
use crate::course::{CourseCatalog, CourseRecord};
use crate::day_letter::DayLetter;
use crate::error::ScheduleError;
use crate::live::{LivePosition, LiveTracker};
use crate::localdb::LocalDb;
use crate::period::{Period, compute_period_times};
use crate::store::{SaveStatus, ScheduleStore};

/// One period of the day joined with its assigned course.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRow<'a> {
    /// The period.
    pub period: Period,

    /// The stored course id, if any.
    pub course_id: Option<&'a str>,

    /// The catalog record of the course, `None` for an empty slot or an id
    /// missing from the catalog.
    pub course: Option<&'a CourseRecord>,
}

impl ScheduleRow<'_> {
    /// Whether a course id is stored that the catalog does not know.
    pub fn is_unknown_course(&self) -> bool {
        self.course_id.is_some() && self.course.is_none()
    }
}

/// The schedule builder of one day letter.
#[derive(Debug)]
pub struct Classday {
    config: Config,
    db: LocalDb,
    catalog: CourseCatalog,
    day: DayLetter,
    periods: Vec<Period>,
    store: ScheduleStore,
}

impl Classday {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        let catalog = match &config.courses_path {
            Some(path) => CourseCatalog::load(path).await?,
            None => CourseCatalog::bundled()
                .map_err(|e| format!("Failed to parse bundled courses: {e}"))?,
        };

        let day = config.day.unwrap_or_else(DayLetter::today);
        tracing::debug!(%day, periods = config.periods, "loading schedule");
        let store = ScheduleStore::load(Arc::new(db.clone()), Some(day), config.periods).await?;
        let periods = compute_period_times(config.periods, &config.template());

        Ok(Self {
            config,
            db,
            catalog,
            day,
            periods,
            store,
        })
    }

    /// The normalized configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The day letter of the loaded schedule.
    pub fn day(&self) -> DayLetter {
        self.day
    }

    /// The periods of the day.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The course catalog.
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// The stored schedule.
    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Every period with its assigned course.
    pub fn rows(&self) -> Vec<ScheduleRow<'_>> {
        self.periods
            .iter()
            .map(|period| {
                let course_id = self.store.slot(period.index);
                ScheduleRow {
                    period: *period,
                    course_id,
                    course: course_id.and_then(|id| self.catalog.find(id)),
                }
            })
            .collect()
    }

    /// Assigns a catalog course to a period, 0-based.
    pub async fn assign(
        &mut self,
        period_index: usize,
        course_id: &str,
    ) -> Result<(), ScheduleError> {
        if self.catalog.find(course_id).is_none() {
            return Err(ScheduleError::UnknownCourse(course_id.to_string()));
        }
        self.store.assign(period_index, course_id).await
    }

    /// Empties a period, 0-based.
    pub async fn remove(&mut self, period_index: usize) -> Result<(), ScheduleError> {
        self.store.remove(period_index).await
    }

    /// Empties every period.
    pub async fn clear_all(&mut self) {
        self.store.clear_all().await;
    }

    /// Changes the number of periods and reloads the stored schedule for it.
    pub async fn set_period_count(&mut self, count: usize) -> Result<(), ScheduleError> {
        if count == 0 {
            return Err(ScheduleError::InvalidConfig("periods must be at least 1".into()));
        }
        self.store.reload(count).await?;
        self.config.periods = count;
        self.periods = compute_period_times(count, &self.config.template());
        Ok(())
    }

    /// Courses matching a picker query.
    pub fn search_courses(&self, query: &str) -> Vec<&CourseRecord> {
        self.catalog.search(query)
    }

    /// The live position at the current local time.
    pub fn live_position(&self) -> LivePosition {
        LivePosition::now(&self.periods)
    }

    /// Starts tracking the live position at the configured interval.
    pub fn track(&self) -> LiveTracker {
        LiveTracker::spawn_local(self.periods.clone(), self.config.poll_interval())
    }

    /// Outcome of the last save.
    pub fn save_status(&self) -> &SaveStatus {
        self.store.save_status()
    }

    /// Close the instance, releasing the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
