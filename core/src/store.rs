// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use jiff::Timestamp;

use crate::day_letter::DayLetter;
use crate::error::{KvError, ScheduleError};
use crate::kv::KvStore;

/// Base key of persisted schedules.
pub const STORAGE_KEY: &str = "userSchedule_v1";

/// The key a schedule is stored under, one per day letter.
pub fn storage_key(day: Option<DayLetter>) -> String {
    match day {
        Some(day) => format!("{STORAGE_KEY}_{day}"),
        None => STORAGE_KEY.to_string(),
    }
}

/// Decodes a stored schedule, a JSON array of course ids or nulls.
pub fn decode_slots(raw: &str) -> Result<Vec<Option<String>>, ScheduleError> {
    serde_json::from_str(raw).map_err(|e| ScheduleError::MalformedPersistedData(e.to_string()))
}

/// Fits a stored schedule to `count` periods. Longer arrays are truncated,
/// shorter ones padded with empty slots; every index below `count` keeps its
/// value.
pub fn reconcile(mut stored: Vec<Option<String>>, count: usize) -> Vec<Option<String>> {
    stored.resize(count, None);
    stored
}

/// Outcome of the most recent save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    /// Nothing has been saved in this session.
    Never,

    /// The in-memory schedule matches the store.
    Saved {
        /// When the save completed.
        at: Timestamp,
    },

    /// The last save failed, memory holds changes the store does not.
    Unsaved {
        /// The last successful save, if any.
        last_saved: Option<Timestamp>,
        /// Why the save failed.
        reason: String,
    },
}

impl SaveStatus {
    /// The last successful save.
    pub fn saved_at(&self) -> Option<Timestamp> {
        match self {
            SaveStatus::Never => None,
            SaveStatus::Saved { at } => Some(*at),
            SaveStatus::Unsaved { last_saved, .. } => *last_saved,
        }
    }

    /// Whether unsaved changes exist.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, SaveStatus::Unsaved { .. })
    }
}

/// The period to course mapping of one day letter, backed by a key-value
/// store.
///
/// A store only exists after it has been hydrated, so it never writes over
/// stored data it has not read.
#[derive(Debug)]
pub struct ScheduleStore {
    kv: Arc<dyn KvStore>,
    day: Option<DayLetter>,
    key: String,
    slots: Vec<Option<String>>,
    status: SaveStatus,
}

impl ScheduleStore {
    /// Loads the schedule of `day` and fits it to `period_count` periods.
    ///
    /// Missing or malformed data yields an empty schedule. A failed read is
    /// returned as [`ScheduleError::Persistence`].
    #[tracing::instrument(skip(kv))]
    pub async fn load(
        kv: Arc<dyn KvStore>,
        day: Option<DayLetter>,
        period_count: usize,
    ) -> Result<Self, ScheduleError> {
        let key = storage_key(day);
        let raw = kv.get(&key).await?;
        let slots = hydrate(&key, raw.as_deref(), period_count);
        Ok(Self {
            kv,
            day,
            key,
            slots,
            status: SaveStatus::Never,
        })
    }

    /// Reads the schedule again, fitted to a new period count.
    ///
    /// While the status is [`SaveStatus::Unsaved`] the backend is stale, so
    /// the in-memory schedule is fitted instead of read back. On a failed
    /// read the current state is kept.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub async fn reload(&mut self, period_count: usize) -> Result<(), ScheduleError> {
        if self.status.is_unsaved() {
            tracing::debug!("unsaved changes, fitting in-memory schedule");
            self.slots = reconcile(std::mem::take(&mut self.slots), period_count);
            return Ok(());
        }

        let raw = self.kv.get(&self.key).await?;
        self.slots = hydrate(&self.key, raw.as_deref(), period_count);
        Ok(())
    }

    /// Assigns a course to a period and saves.
    pub async fn assign(
        &mut self,
        period_index: usize,
        course_id: impl Into<String>,
    ) -> Result<(), ScheduleError> {
        let slot = self.slot_mut(period_index)?;
        *slot = Some(course_id.into());
        self.save().await;
        Ok(())
    }

    /// Empties a period and saves.
    pub async fn remove(&mut self, period_index: usize) -> Result<(), ScheduleError> {
        let slot = self.slot_mut(period_index)?;
        *slot = None;
        self.save().await;
        Ok(())
    }

    /// Empties every period and saves.
    pub async fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.save().await;
    }

    /// Writes the schedule under its key.
    ///
    /// On failure the in-memory schedule stays authoritative and the status
    /// becomes [`SaveStatus::Unsaved`].
    pub async fn persist(&mut self) -> Result<Timestamp, ScheduleError> {
        let json = serde_json::to_string(&self.slots)
            .map_err(|e| KvError::Backend(e.to_string()))?;

        match self.kv.set(&self.key, &json).await {
            Ok(()) => {
                let at = Timestamp::now();
                tracing::debug!(key = %self.key, %at, "schedule saved");
                self.status = SaveStatus::Saved { at };
                Ok(at)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to save schedule");
                self.status = SaveStatus::Unsaved {
                    last_saved: self.status.saved_at(),
                    reason: err.to_string(),
                };
                Err(err.into())
            }
        }
    }

    // The error is kept in the status, the next mutation retries.
    async fn save(&mut self) {
        let _ = self.persist().await;
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<String>, ScheduleError> {
        let count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(ScheduleError::OutOfRange { index, count })
    }

    /// All slots, one per period.
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// The course assigned to a period, if any.
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// Number of periods.
    pub fn period_count(&self) -> usize {
        self.slots.len()
    }

    /// The day letter this schedule belongs to.
    pub fn day(&self) -> Option<DayLetter> {
        self.day
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Outcome of the last save.
    pub fn save_status(&self) -> &SaveStatus {
        &self.status
    }

    /// The last successful save.
    pub fn saved_at(&self) -> Option<Timestamp> {
        self.status.saved_at()
    }
}

fn hydrate(key: &str, raw: Option<&str>, period_count: usize) -> Vec<Option<String>> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        tracing::debug!(key, "no stored schedule, starting empty");
        return vec![None; period_count];
    };

    match decode_slots(raw) {
        Ok(stored) => {
            tracing::debug!(key, stored = stored.len(), period_count, "hydrated schedule");
            reconcile(stored, period_count)
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding stored schedule");
            vec![None; period_count]
        }
    }
}
