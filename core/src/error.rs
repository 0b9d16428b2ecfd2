// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised by a durable key-value backend.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum KvError {
    /// The backend refused or failed the operation.
    #[error("Backend error: {0}")]
    Backend(String),

    /// SQLite layer error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),
}

/// Errors of the schedule subsystem.
///
/// None of these is fatal: callers either reject the single operation
/// (`OutOfRange`, `UnknownCourse`) or keep working on in-memory state.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A period index outside `[0, count)`.
    #[error("Period {index} is out of range, the schedule has {count} periods")]
    OutOfRange {
        /// The rejected 0-based index.
        index: usize,
        /// The configured period count.
        count: usize,
    },

    /// Stored data is not a JSON array of course ids or nulls.
    #[error("Malformed persisted schedule: {0}")]
    MalformedPersistedData(String),

    /// The durable store could not be read or written.
    #[error("Failed to access schedule storage: {0}")]
    Persistence(#[from] KvError),

    /// The course id is not in the catalog.
    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
