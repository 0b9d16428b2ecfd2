// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven behavior workflow tests.
//!
//! These tests validate how configuration shapes the day: the period grid,
//! the course catalog and the day letter.

use classday_core::{Classday, Config, DayLetter, format_clock};

use crate::common::{TEST_COURSES, TestConfigBuilder, setup_temp_dirs};

#[tokio::test]
async fn config_from_toml_drives_period_grid() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let toml_str = format!(
        r#"
state_dir = "{}"
periods = 3
day = "B"
start_of_day = "8:00"
lesson_length = 50
break_length = 10
"#,
        temp_dirs.state_dir.display()
    );
    let config: Config = toml::from_str(&toml_str).unwrap();

    // Act
    let classday = Classday::new(config).await.unwrap();

    // Assert
    let grid: Vec<_> = classday
        .periods()
        .iter()
        .map(|p| (format_clock(p.start), format_clock(p.end)))
        .collect();
    assert_eq!(
        grid,
        vec![
            ("8:00".to_string(), "8:50".to_string()),
            ("9:00".to_string(), "9:50".to_string()),
            ("10:00".to_string(), "10:50".to_string()),
        ]
    );
    assert_eq!(classday.day(), DayLetter::B);
    assert_eq!(classday.store().key(), "userSchedule_v1_B");
    classday.close().await.unwrap();
}

#[tokio::test]
async fn config_default_grid_matches_school_day() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_day(DayLetter::A)
        .build();
    let classday = Classday::new(config).await.unwrap();

    let periods = classday.periods();
    assert_eq!(periods.len(), 9);
    assert_eq!(periods[0].to_string(), "7:59 — 8:39");
    assert_eq!(periods[1].to_string(), "8:43 — 9:23");
    assert_eq!(periods[8].to_string(), "13:51 — 14:31");
    classday.close().await.unwrap();
}

#[tokio::test]
async fn config_courses_path_replaces_bundled_catalog() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let courses_path = temp_dirs.create_courses_file(TEST_COURSES).await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_courses_path(&courses_path)
        .with_day(DayLetter::A)
        .build();

    let mut classday = Classday::new(config).await.unwrap();
    assert_eq!(classday.catalog().len(), 3);
    assert_eq!(classday.catalog().find("ENG101").unwrap().code, "1101");

    let found: Vec<_> = classday
        .search_courses("geo")
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(found, vec!["MATH210"]);

    // courses only in the bundled catalog are unknown here
    assert!(classday.assign(0, "SPAN101").await.is_err());
    classday.assign(0, "ENG101").await.unwrap();
    classday.close().await.unwrap();
}

#[tokio::test]
async fn config_missing_courses_file_fails() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_courses_path(&temp_dirs.data_dir.join("missing.json"))
        .build();

    let err = Classday::new(config).await.unwrap_err();
    assert!(err.to_string().contains("course file"), "{err}");
}

#[tokio::test]
async fn config_zero_periods_fails() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_periods(0)
        .build();

    let err = Classday::new(config).await.unwrap_err();
    assert!(err.to_string().contains("periods"), "{err}");
}

#[tokio::test]
async fn config_without_day_resolves_today() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .build();

    let classday = Classday::new(config).await.unwrap();
    assert_eq!(classday.day(), DayLetter::today());
    assert_eq!(
        classday.store().key(),
        format!("userSchedule_v1_{}", classday.day().as_str())
    );
    assert_ne!(classday.store().key(), "userSchedule_v1");
    classday.close().await.unwrap();
}
