//! Postgres-backed summaries store.

use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::{NoTls, Row};
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::{StoredSummary, SummaryStore};

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS summaries (
    id          uuid PRIMARY KEY,
    url         text,
    title       text,
    summary     text NOT NULL,
    translation text,
    word_count  bigint NOT NULL,
    key_topics  text[] NOT NULL DEFAULT '{}',
    created_at  timestamptz NOT NULL
)";

const INSERT: &str = "
INSERT INTO summaries (id, url, title, summary, translation, word_count, key_topics, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

const SELECT_BY_ID: &str = "
SELECT id, url, title, summary, translation, word_count, key_topics, created_at
FROM summaries WHERE id = $1";

/// Summaries table behind a connection pool.
#[derive(Clone)]
pub struct PgSummaryStore {
    pool: Pool,
}

impl PgSummaryStore {
    /// Builds a pool for `database_url` and makes sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let config = Config { url: Some(database_url.to_string()), ..Default::default() };
        let pool = config.create_pool(Some(Runtime::Tokio1), NoTls)?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_TABLE).await?;
        tracing::info!("summaries table ready");
        Ok(())
    }
}

fn from_row(row: &Row) -> Result<StoredSummary, StorageError> {
    Ok(StoredSummary {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        translation: row.try_get("translation")?,
        word_count: row.try_get("word_count")?,
        key_topics: row.try_get("key_topics")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SummaryStore for PgSummaryStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, s: &StoredSummary) -> Result<(), StorageError> {
        let client = self.pool.get().await?;
        client
            .execute(
                INSERT,
                &[&s.id, &s.url, &s.title, &s.summary, &s.translation, &s.word_count, &s.key_topics, &s.created_at],
            )
            .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredSummary>, StorageError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(SELECT_BY_ID, &[&id]).await?;
        row.as_ref().map(from_row).transpose()
    }
}
