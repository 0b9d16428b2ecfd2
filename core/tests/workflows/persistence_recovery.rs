// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence failure and recovery workflow tests.
//!
//! Malformed stored data, unreadable storage and failing writes must never
//! lose the user's in-memory schedule or overwrite data that was not read.

use std::sync::Arc;

use classday_core::{
    Classday, DayLetter, KvStore, LocalDb, SaveStatus, ScheduleError, ScheduleStore,
};

use crate::common::{FlakyKv, setup_temp_dirs, test_config};

#[tokio::test]
async fn malformed_sqlite_value_recovers_to_empty_schedule() {
    // Arrange - corrupt the stored schedule
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let db_path = temp_dirs.state_dir.join("classday.db");
    let db = LocalDb::open(Some(&db_path)).await.unwrap();
    db.set("userSchedule_v1_B", "{\"not\": \"an array\"}")
        .await
        .unwrap();
    db.close().await.unwrap();

    // Act
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::B))
        .await
        .unwrap();

    // Assert - empty schedule, next mutation replaces the bad value
    assert!(classday.rows().iter().all(|row| row.course_id.is_none()));
    classday.assign(3, "SOC110").await.unwrap();
    classday.close().await.unwrap();

    let db = LocalDb::open(Some(&db_path)).await.unwrap();
    let stored = db.get("userSchedule_v1_B").await.unwrap().unwrap();
    assert_eq!(
        stored,
        r#"[null,null,null,"SOC110",null,null,null,null,null]"#
    );
    db.close().await.unwrap();
}

#[tokio::test]
async fn unreadable_storage_fails_the_load() {
    let kv = Arc::new(FlakyKv::default());
    kv.set("userSchedule_v1_A", r#"["CS101"]"#).await.unwrap();
    kv.fail_reads(true);

    let err = ScheduleStore::load(kv.clone(), Some(DayLetter::A), 9)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Persistence(_)));

    // the stored value is untouched
    kv.fail_reads(false);
    assert_eq!(
        kv.get("userSchedule_v1_A").await.unwrap().as_deref(),
        Some(r#"["CS101"]"#)
    );
}

#[tokio::test]
async fn failed_save_keeps_changes_until_the_next_mutation() {
    let kv = Arc::new(FlakyKv::default());
    let mut store = ScheduleStore::load(kv.clone(), Some(DayLetter::A), 9)
        .await
        .unwrap();
    store.assign(0, "CS101").await.unwrap();
    let saved_at = store.saved_at().unwrap();

    kv.fail_writes(true);
    store.assign(1, "ENG101").await.unwrap();
    store.assign(2, "MATH210").await.unwrap();
    assert_eq!(store.slot(2), Some("MATH210"));
    assert!(matches!(
        store.save_status(),
        SaveStatus::Unsaved { last_saved: Some(at), .. } if *at == saved_at
    ));

    // a fresh session still sees only the saved state
    let fresh = ScheduleStore::load(kv.clone(), Some(DayLetter::A), 9)
        .await
        .unwrap();
    assert_eq!(fresh.slot(0), Some("CS101"));
    assert_eq!(fresh.slot(1), None);

    // the next successful mutation writes everything
    kv.fail_writes(false);
    store.remove(8).await.unwrap();
    assert!(matches!(store.save_status(), SaveStatus::Saved { .. }));
    let fresh = ScheduleStore::load(kv, Some(DayLetter::A), 9).await.unwrap();
    assert_eq!(fresh.slot(1), Some("ENG101"));
    assert_eq!(fresh.slot(2), Some("MATH210"));
}
