use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use habari_core::{Article, ArticleStore, Result};

struct StoredArticle {
    article: Article,
    inserted_at: DateTime<Utc>,
}

/// In-memory article cache, keyed by article id. The default backend
/// for one-shot runs and tests.
pub struct MemoryStore {
    rows: RwLock<HashMap<String, StoredArticle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn put(&self, article: &Article) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.insert(
            article.id.clone(),
            StoredArticle {
                article: article.clone(),
                inserted_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get_since(&self, max_age_hours: i64) -> Result<Vec<Article>> {
        let cutoff = Utc::now() - Duration::hours(max_age_hours);
        let rows = self.rows.read().await;

        let mut recent: Vec<&StoredArticle> =
            rows.values().filter(|row| row.inserted_at > cutoff).collect();
        recent.sort_by(|a, b| b.inserted_at.cmp(&a.inserted_at));

        Ok(recent.into_iter().map(|row| row.article.clone()).collect())
    }
}
