use std::path::Path;

use chrono::NaiveDateTime;
use sqlx::{
    query, query_as,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Pool, Sqlite,
};

use crate::recent::{RecentStore, RECENT_KEY};

#[derive(Debug, FromRow)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: NaiveDateTime,
}

/// Small key-value table in a SQLite file.
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn open(path: &Path) -> sqlx::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    pub async fn get_value(&self, key: &str) -> sqlx::Result<Option<StoredValue>> {
        query_as("SELECT value, updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn set_value(&self, key: &str, value: &str) -> sqlx::Result<()> {
        query(
            "INSERT INTO kv_store(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }

    pub async fn last_saved(&self, key: &str) -> sqlx::Result<Option<NaiveDateTime>> {
        Ok(self.get_value(key).await?.map(|stored| stored.updated_at))
    }
}

impl RecentStore for Storage {
    async fn load(&self) -> anyhow::Result<Vec<String>> {
        match self.get_value(RECENT_KEY).await? {
            Some(stored) => Ok(serde_json::from_str(&stored.value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, terms: &[String]) -> anyhow::Result<()> {
        self.set_value(RECENT_KEY, &serde_json::to_string(terms)?)
            .await?;
        Ok(())
    }
}
