//! The aggregation pipeline: concurrent fan-out over every configured
//! source, merge, dedup, rank, persist, and snapshot. The service owns
//! all run state explicitly; overlapping refreshes are serialized by a
//! run-lock instead of racing on shared caches.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex, RwLock, Semaphore};
use tracing::{error, info, warn};

use habari_core::dedup::dedup_articles;
use habari_core::rank::{sort_articles, Ranking};
use habari_core::trending::trending_topics;
use habari_core::{Article, ArticleStore, SourceConfig};

use crate::fetcher::FeedFetcher;

/// Hard ceiling on in-flight feed requests; the rest queue.
const MAX_CONCURRENT_FETCHES: usize = 10;

/// Whole-batch deadline. Batches that arrived before it are kept;
/// stragglers are abandoned until the next scheduled run.
const BATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Age window for the cached fallback batch.
const CACHE_MAX_AGE_HOURS: i64 = 6;

const TOP_TOPICS: usize = 10;

#[derive(Default)]
struct Snapshot {
    articles: Vec<Article>,
    trending: Vec<(String, usize)>,
    last_updated: Option<DateTime<Utc>>,
}

pub struct AggregationService {
    fetcher: Arc<FeedFetcher>,
    sources: Vec<SourceConfig>,
    storage: Arc<dyn ArticleStore>,
    semaphore: Arc<Semaphore>,
    run_lock: Mutex<()>,
    snapshot: RwLock<Snapshot>,
}

impl AggregationService {
    pub fn new(sources: Vec<SourceConfig>, storage: Arc<dyn ArticleStore>) -> Self {
        Self {
            fetcher: Arc::new(FeedFetcher::new()),
            sources,
            storage,
            semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES)),
            run_lock: Mutex::new(()),
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Run one aggregation pass and update the snapshot. Source-level
    /// failures only shrink the result; when every source fails the
    /// previously cached batch is served instead, so the return value
    /// is a (possibly empty) batch rather than an error.
    pub async fn refresh(&self) -> Vec<Article> {
        let _guard = self.run_lock.lock().await;
        let started = std::time::Instant::now();
        info!(sources = self.sources.len(), "📰 starting aggregation run");

        let merged = self.collect_batches().await;
        let fetched = merged.len();

        let mut articles = dedup_articles(merged);
        sort_articles(&mut articles, Ranking::Recency);

        if articles.is_empty() {
            warn!("aggregation produced no articles, falling back to cached batch");
            articles = match self.storage.get_since(CACHE_MAX_AGE_HOURS).await {
                Ok(cached) => cached,
                Err(e) => {
                    error!(error = %e, "failed to read cached articles");
                    Vec::new()
                }
            };
        } else {
            self.persist(&articles).await;
        }

        let trending = trending_topics(&articles, TOP_TOPICS);

        let mut snapshot = self.snapshot.write().await;
        snapshot.articles = articles.clone();
        snapshot.trending = trending;
        snapshot.last_updated = Some(Utc::now());
        drop(snapshot);

        info!(
            fetched,
            unique = articles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✨ aggregation run finished"
        );
        articles
    }

    /// Fan out one fetch task per source, gated by the connection
    /// semaphore, and gather whatever arrives before the batch deadline.
    async fn collect_batches(&self) -> Vec<Article> {
        if self.sources.is_empty() {
            return Vec::new();
        }

        let (tx, mut rx) = mpsc::channel(self.sources.len());
        for source in self.sources.iter().cloned() {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let (articles, _outcome) = fetcher.fetch(&source).await;
                let _ = tx.send(articles).await;
            });
        }
        drop(tx);

        let deadline = tokio::time::Instant::now() + BATCH_TIMEOUT;
        let mut merged = Vec::new();
        loop {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(batch)) => merged.extend(batch),
                Ok(None) => break,
                Err(_) => {
                    warn!("batch deadline reached, abandoning in-flight fetches");
                    break;
                }
            }
        }
        merged
    }

    /// Cache the batch. A write failure is logged and swallowed; the
    /// in-memory result is still served.
    async fn persist(&self, articles: &[Article]) {
        let puts = articles.iter().map(|article| async move {
            if let Err(e) = self.storage.put(article).await {
                error!(error = %e, id = %article.id, "failed to cache article");
            }
        });
        futures::future::join_all(puts).await;
    }

    /// Current snapshot, in the requested ordering.
    pub async fn articles(&self, ranking: Ranking) -> Vec<Article> {
        let snapshot = self.snapshot.read().await;
        let mut articles = snapshot.articles.clone();
        drop(snapshot);
        sort_articles(&mut articles, ranking);
        articles
    }

    pub async fn trending(&self) -> Vec<(String, usize)> {
        self.snapshot.read().await.trending.clone()
    }

    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.last_updated
    }
}
