use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Upsert an article, keyed by its id.
    async fn put(&self, article: &Article) -> Result<()>;

    /// Articles stored within the last `max_age_hours`, newest insertion
    /// first. Used as the fallback batch when a live run returns nothing.
    async fn get_since(&self, max_age_hours: i64) -> Result<Vec<Article>>;
}
