//! Fetches and parses a single feed source. Failures are contained
//! here: a source that times out, returns a bad status or serves a
//! malformed body contributes an empty batch and a recorded outcome,
//! never an error that could abort the whole aggregation run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use habari_core::types::article_id;
use habari_core::{enrich, Article, Error, Result, SourceConfig};

/// Per-request timeout; a hanging source must not hold up the batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Only the first entries of a feed are taken, in feed order, to bound
/// per-source cost.
const MAX_ENTRIES_PER_SOURCE: usize = 10;

const USER_AGENT: &str = "habari-aggregator/0.1";

const DESCRIPTION_MAX_CHARS: usize = 300;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("invalid tag regex"));

static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).expect("invalid img regex"));

/// What happened to a single source during a fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(usize),
    Failed(String),
}

pub struct FeedFetcher {
    client: reqwest::Client,
}

impl Default for FeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build feed HTTP client");
        Self { client }
    }

    /// Fetch one source. Any failure is logged and folded into the
    /// outcome; the returned batch is empty in that case.
    pub async fn fetch(&self, source: &SourceConfig) -> (Vec<Article>, FetchOutcome) {
        match self.try_fetch(source).await {
            Ok(articles) => {
                debug!(source = %source.name, count = articles.len(), "fetched feed");
                let count = articles.len();
                (articles, FetchOutcome::Fetched(count))
            }
            Err(e) => {
                warn!(source = %source.name, error = %e, "feed fetch failed");
                (Vec::new(), FetchOutcome::Failed(e.to_string()))
            }
        }
    }

    async fn try_fetch(&self, source: &SourceConfig) -> Result<Vec<Article>> {
        let response = self.client.get(&source.feed_url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Feed(format!(
                "HTTP {} from {}",
                response.status(),
                source.name
            )));
        }

        let bytes = response.bytes().await?;
        let feed = feed_rs::parser::parse(&bytes[..])
            .map_err(|e| Error::Feed(format!("malformed feed from {}: {}", source.name, e)))?;

        Ok(articles_from_feed(feed, source, Utc::now()))
    }
}

fn articles_from_feed(
    feed: feed_rs::model::Feed,
    source: &SourceConfig,
    fetched_at: DateTime<Utc>,
) -> Vec<Article> {
    feed.entries
        .into_iter()
        .take(MAX_ENTRIES_PER_SOURCE)
        .filter_map(|entry| article_from_entry(entry, source, fetched_at))
        .collect()
}

/// Build one article from a parsed feed entry. Entries without a usable
/// title or URL are skipped, not errors; a bad entry never drops the
/// rest of its batch.
pub fn article_from_entry(
    entry: Entry,
    source: &SourceConfig,
    fetched_at: DateTime<Utc>,
) -> Option<Article> {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    let url = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .or_else(|| entry.id.starts_with("http").then(|| entry.id.clone()))?;

    if title.is_empty() || url.is_empty() {
        return None;
    }

    let published_at = entry.published.or(entry.updated).unwrap_or(fetched_at);

    let summary_raw = entry
        .summary
        .as_ref()
        .map(|t| t.content.clone())
        .unwrap_or_default();
    let content = entry
        .content
        .as_ref()
        .and_then(|c| c.body.clone())
        .unwrap_or_else(|| summary_raw.clone());
    let thumbnail = extract_thumbnail(&entry, &content);
    let description = clean_description(&summary_raw);

    let category = enrich::categorize(&title, &description, source.default_category);
    let country_focus = enrich::country_focus(&title, &description, &source.country);
    let is_breaking = enrich::is_breaking(&title, &description);
    let engagement_score = enrich::engagement_score(&title, &description, is_breaking);

    Some(Article {
        id: article_id(&url, &title),
        title,
        description,
        content,
        url,
        thumbnail,
        source: source.name.clone(),
        category,
        country_focus,
        language: source.language.clone(),
        published_at,
        is_breaking,
        is_trending: engagement_score > enrich::TRENDING_THRESHOLD,
        engagement_score,
        credibility_score: source.credibility,
    })
}

/// Thumbnail precedence: media thumbnail, then an image-typed media
/// content (enclosure), then the first <img> in the content HTML, then
/// an image-typed link.
fn extract_thumbnail(entry: &Entry, content_html: &str) -> Option<String> {
    for media in &entry.media {
        if let Some(thumb) = media.thumbnails.first() {
            return Some(thumb.image.uri.clone());
        }
    }

    for media in &entry.media {
        for item in &media.content {
            let is_image = item
                .content_type
                .as_ref()
                .map(|m| m.ty() == "image")
                .unwrap_or(false);
            if is_image {
                if let Some(url) = &item.url {
                    return Some(url.to_string());
                }
            }
        }
    }

    if let Some(captures) = IMG_SRC_RE.captures(content_html) {
        return Some(captures[1].to_string());
    }

    entry
        .links
        .iter()
        .find(|l| {
            l.media_type
                .as_deref()
                .map(|t| t.starts_with("image/"))
                .unwrap_or(false)
        })
        .map(|l| l.href.clone())
}

/// Strip HTML tags, trim, and truncate to 300 characters with an
/// ellipsis marker when something was cut.
pub fn clean_description(raw: &str) -> String {
    let stripped = TAG_RE.replace_all(raw, "");
    let trimmed = stripped.trim();

    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        let cut: String = trimmed.chars().take(DESCRIPTION_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
