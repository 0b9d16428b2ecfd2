// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the classday personal schedule builder: period times, the A/B day
//! cycle, persisted period to course assignments and the live position in the
//! school day.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod classday;
mod config;
mod course;
mod day_letter;
mod error;
mod kv;
mod live;
mod localdb;
mod period;
mod store;

pub use crate::classday::{Classday, ScheduleRow};
pub use crate::config::{APP_NAME, Config, ConfigClock, DB_FILE_NAME};
pub use crate::course::{CourseCatalog, CourseRecord};
pub use crate::day_letter::DayLetter;
pub use crate::error::{KvError, ScheduleError};
pub use crate::kv::{KvStore, MemoryKv};
pub use crate::live::{DEFAULT_POLL_INTERVAL, LivePosition, LiveTracker, local_minutes};
pub use crate::localdb::LocalDb;
pub use crate::period::{
    DayTemplate, Period, compute_period_times, format_clock, minutes_of_day, parse_clock,
};
pub use crate::store::{
    STORAGE_KEY, SaveStatus, ScheduleStore, decode_slots, reconcile, storage_key,
};
