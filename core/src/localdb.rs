// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod kv_entries;

use std::error::Error;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::KvError;
use crate::kv::KvStore;
use crate::localdb::kv_entries::KvEntries;

/// SQLite-backed durable key-value storage.
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub(crate) kv_entries: KvEntries,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let options = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // a single connection keeps an in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        let kv_entries = KvEntries::new(pool.clone());
        Ok(LocalDb { pool, kv_entries })
    }

    /// Closes the connection pool.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl KvStore for LocalDb {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let record = self.kv_entries.get(key).await?;
        Ok(record.map(|r| r.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.kv_entries.upsert(key, value).await?;
        Ok(())
    }
}
