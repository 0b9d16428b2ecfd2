// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tokio::fs;

const BUNDLED_COURSES: &str = include_str!("../data/courses.json");

/// A course offered by the school. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CourseRecord {
    /// Unique identifier, the value stored in schedules.
    pub id: String,

    /// Department name.
    #[serde(default)]
    pub dept: String,

    /// Catalog code, stored either as a string or a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: String,

    /// Course title.
    pub title: String,

    /// Long description.
    #[serde(default)]
    pub description: String,

    /// Credits earned.
    #[serde(default)]
    pub credits: Option<f64>,

    /// Prerequisite, free text.
    #[serde(default)]
    pub prerequisite: String,

    /// Grade levels allowed to enroll.
    #[serde(default)]
    pub grade_levels: Vec<String>,

    /// Whether this is an Advanced Placement course.
    #[serde(default)]
    pub ap_flag: bool,

    /// Whether the course may be taken more than once.
    #[serde(default)]
    pub repeatable: bool,

    /// Additional notes, free text.
    #[serde(default)]
    pub additional_notes: String,

    /// Page of the printed catalog the course appears on.
    #[serde(default)]
    pub source_page: Option<i64>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(s) => s,
        Code::Integer(n) => n.to_string(),
        Code::Float(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { courses: Vec<CourseRecord> },
    Bare(Vec<CourseRecord>),
}

/// The static collection of courses, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<CourseRecord>,
    index: HashMap<String, usize>,
}

impl CourseCatalog {
    /// Builds a catalog, the first course wins when ids repeat.
    pub fn new(courses: Vec<CourseRecord>) -> Self {
        let mut index = HashMap::with_capacity(courses.len());
        for (i, course) in courses.iter().enumerate() {
            if index.contains_key(&course.id) {
                tracing::warn!(id = %course.id, "duplicate course id, keeping the first one");
                continue;
            }
            index.insert(course.id.clone(), i);
        }
        Self { courses, index }
    }

    /// The catalog compiled into the crate.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_COURSES)
    }

    /// Parses a catalog from either a bare array or `{ "courses": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let courses = match serde_json::from_str(json)? {
            CatalogFile::Wrapped { courses } | CatalogFile::Bare(courses) => courses,
        };
        Ok(Self::new(courses))
    }

    /// Loads a catalog fixture from disk.
    #[tracing::instrument]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read course file {}: {e}", path.display()))?;

        let catalog = Self::from_json(&content)
            .map_err(|e| format!("Failed to parse course file {}: {e}", path.display()))?;

        tracing::debug!(count = catalog.len(), "loaded courses");
        Ok(catalog)
    }

    /// Looks a course up by id. An unknown id is not an error.
    pub fn find(&self, id: &str) -> Option<&CourseRecord> {
        self.index.get(id).and_then(|&i| self.courses.get(i))
    }

    /// Courses whose title, id, department or code contain the query,
    /// ignoring case and surrounding whitespace. An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<&CourseRecord> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.courses.iter().collect();
        }

        self.courses
            .iter()
            .filter(|c| {
                c.title.to_lowercase().contains(&q)
                    || c.id.to_lowercase().contains(&q)
                    || c.dept.to_lowercase().contains(&q)
                    || c.code.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// All courses in catalog order.
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
