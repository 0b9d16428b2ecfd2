// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct KvEntries {
    pool: SqlitePool,
}

impl KvEntries {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO kv_entries (key, value, updated_at)
VALUES (?, ?, ?)
ON CONFLICT(key) DO UPDATE SET
    value      = excluded.value,
    updated_at = excluded.updated_at;
";

        sqlx::query(SQL)
            .bind(key)
            .bind(value)
            .bind(Timestamp::now().to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<KvRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT key, value, updated_at
FROM kv_entries
WHERE key = ?;
";

        sqlx::query_as(SQL)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }
}

#[derive(Debug, sqlx::FromRow)]
#[allow(dead_code)]
pub struct KvRecord {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
