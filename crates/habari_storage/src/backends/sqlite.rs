use std::path::Path;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use tracing::error;

use habari_core::{Article, ArticleStore, Error, Result};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL,
        created_at TEXT NOT NULL,
        source TEXT,
        category TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_source ON articles(source)",
    "CREATE INDEX IF NOT EXISTS idx_articles_category ON articles(category)",
];

/// SQLite-backed article cache. Each row carries the serialized article
/// as a JSON blob, with source and category mirrored into indexed
/// columns.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("failed to open {}: {}", db_path.display(), e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("migration {} failed: {}", i, e)))?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn put(&self, article: &Article) -> Result<()> {
        let data = serde_json::to_string(article)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles (id, data, created_at, source, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(data)
        .bind(Utc::now().to_rfc3339())
        .bind(&article.source)
        .bind(article.category.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to store article: {}", e)))?;

        Ok(())
    }

    async fn get_since(&self, max_age_hours: i64) -> Result<Vec<Article>> {
        let cutoff = (Utc::now() - Duration::hours(max_age_hours)).to_rfc3339();

        let rows = sqlx::query(
            r#"
            SELECT data FROM articles
            WHERE created_at > ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("failed to read cached articles: {}", e)))?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            let data: String = row.get("data");
            match serde_json::from_str::<Article>(&data) {
                Ok(article) => articles.push(article),
                Err(e) => error!(error = %e, "skipping unparseable cached article"),
            }
        }

        Ok(articles)
    }
}
