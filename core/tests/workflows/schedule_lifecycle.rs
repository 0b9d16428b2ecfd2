// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule lifecycle workflow tests.
//!
//! Assign, remove and clear courses, then reopen the state directory and
//! check what a new session sees.

use classday_core::{Classday, DayLetter, KvStore, LocalDb, SaveStatus, ScheduleError};

use crate::common::{TestConfigBuilder, setup_temp_dirs, test_config};

#[tokio::test]
async fn assignment_survives_a_new_session() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    assert!(classday.rows().iter().all(|row| row.course_id.is_none()));

    // Act
    classday.assign(0, "CS101").await.unwrap();
    assert!(matches!(classday.save_status(), SaveStatus::Saved { .. }));
    classday.close().await.unwrap();

    // Assert
    let classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    let rows = classday.rows();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].course_id, Some("CS101"));
    assert_eq!(
        rows[0].course.map(|c| c.title.as_str()),
        Some("Introduction to Computer Science")
    );
    assert!(rows[1..].iter().all(|row| row.course_id.is_none()));
    classday.close().await.unwrap();
}

#[tokio::test]
async fn day_letters_keep_separate_schedules() {
    let temp_dirs = setup_temp_dirs().await.unwrap();

    let mut a = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    a.assign(2, "MATH210").await.unwrap();
    a.close().await.unwrap();

    let mut b = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::B))
        .await
        .unwrap();
    assert_eq!(b.day(), DayLetter::B);
    assert!(b.rows().iter().all(|row| row.course_id.is_none()));
    b.assign(2, "ART100").await.unwrap();
    b.close().await.unwrap();

    let a = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    assert_eq!(a.rows()[2].course_id, Some("MATH210"));
    a.close().await.unwrap();
}

#[tokio::test]
async fn unknown_course_is_rejected_without_change() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();

    let err = classday.assign(0, "NOPE999").await.unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownCourse(id) if id == "NOPE999"));
    assert!(classday.rows()[0].course_id.is_none());
    assert_eq!(classday.save_status(), &SaveStatus::Never);
    classday.close().await.unwrap();
}

#[tokio::test]
async fn out_of_range_period_is_rejected() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::B))
        .await
        .unwrap();

    let err = classday.assign(9, "CS101").await.unwrap_err();
    assert!(matches!(err, ScheduleError::OutOfRange { index: 9, count: 9 }));
    let err = classday.remove(42).await.unwrap_err();
    assert!(matches!(err, ScheduleError::OutOfRange { index: 42, count: 9 }));
    classday.close().await.unwrap();
}

#[tokio::test]
async fn remove_and_clear_are_persisted() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    classday.assign(0, "ENG101").await.unwrap();
    classday.assign(1, "SCI100").await.unwrap();
    classday.assign(2, "PE100").await.unwrap();
    classday.remove(1).await.unwrap();
    classday.close().await.unwrap();

    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    let ids: Vec<_> = classday.rows().iter().map(|row| row.course_id).collect();
    assert_eq!(&ids[..3], &[Some("ENG101"), None, Some("PE100")]);

    classday.clear_all().await;
    classday.close().await.unwrap();

    let classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    assert!(classday.rows().iter().all(|row| row.course_id.is_none()));
    classday.close().await.unwrap();
}

#[tokio::test]
async fn shorter_day_keeps_leading_assignments() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let ids = [
        "ENG101", "MATH110", "SCI100", "SOC110", "CS101", "ART100", "MUS200", "PE100", "SPAN101",
    ];

    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    for (i, id) in ids.iter().enumerate() {
        classday.assign(i, id).await.unwrap();
    }
    classday.close().await.unwrap();

    // six periods see the first six assignments
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_day(DayLetter::A)
        .with_periods(6)
        .build();
    let classday = Classday::new(config).await.unwrap();
    let seen: Vec<_> = classday.rows().iter().map(|row| row.course_id).collect();
    let expected: Vec<_> = ids[..6].iter().map(|id| Some(*id)).collect();
    assert_eq!(seen, expected);
    classday.close().await.unwrap();

    // nothing was written, so nine periods still see all nine
    let classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    assert_eq!(classday.rows()[8].course_id, Some("SPAN101"));
    classday.close().await.unwrap();
}

#[tokio::test]
async fn set_period_count_reloads_schedule() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::B))
        .await
        .unwrap();
    classday.assign(7, "CSAPA").await.unwrap();

    classday.set_period_count(4).await.unwrap();
    assert_eq!(classday.periods().len(), 4);
    assert_eq!(classday.rows().len(), 4);

    classday.set_period_count(9).await.unwrap();
    assert_eq!(classday.rows()[7].course_id, Some("CSAPA"));

    assert!(classday.set_period_count(0).await.is_err());
    classday.close().await.unwrap();
}

#[tokio::test]
async fn stored_id_missing_from_catalog_renders_as_unknown() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let db = LocalDb::open(Some(&temp_dirs.state_dir.join("classday.db")))
        .await
        .unwrap();
    db.set("userSchedule_v1_A", r#"["REMOVED1",null,"CS101"]"#)
        .await
        .unwrap();
    db.close().await.unwrap();

    let classday = Classday::new(test_config(&temp_dirs.state_dir, DayLetter::A))
        .await
        .unwrap();
    let rows = classday.rows();
    assert!(rows[0].is_unknown_course());
    assert_eq!(rows[0].course_id, Some("REMOVED1"));
    assert!(!rows[1].is_unknown_course());
    assert!(rows[2].course.is_some());
    classday.close().await.unwrap();
}
