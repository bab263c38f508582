use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fixed category taxonomy. Categories are derived from article text,
/// never taken from the feed itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Technology,
    Business,
    Politics,
    Sports,
    Health,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Politics => "politics",
            Category::Sports => "sports",
            Category::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single aggregated news article. Constructed once per parsed feed
/// entry and never mutated afterwards; every derived field is computed
/// before the record is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub source: String,
    pub category: Category,
    pub country_focus: Vec<String>,
    pub language: String,
    pub published_at: DateTime<Utc>,
    pub is_breaking: bool,
    pub is_trending: bool,
    pub engagement_score: f32,
    pub credibility_score: f32,
}

/// Stable fingerprint for an article. Two fetches of the same story,
/// even from different sources, collapse to the same id when the
/// (url, title) pair coincides.
pub fn article_id(url: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

/// A configured feed endpoint. Loaded once at startup and immutable for
/// the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub name: String,
    pub feed_url: String,
    pub country: String,
    pub language: String,
    pub default_category: Category,
    pub credibility: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: article_id("https://example.com/a", "Test story"),
            title: "Test story".to_string(),
            description: "A short description".to_string(),
            content: "A short description".to_string(),
            url: "https://example.com/a".to_string(),
            thumbnail: None,
            source: "Test Source".to_string(),
            category: Category::Technology,
            country_focus: vec!["kenya".to_string()],
            language: "en".to_string(),
            published_at: Utc::now(),
            is_breaking: false,
            is_trending: false,
            engagement_score: 5.0,
            credibility_score: 7.5,
        }
    }

    #[test]
    fn test_article_id_deterministic() {
        let a = article_id("https://example.com/a", "Some title");
        let b = article_id("https://example.com/a", "Some title");
        assert_eq!(a, b);
    }

    #[test]
    fn test_article_id_distinct_pairs() {
        let a = article_id("https://example.com/a", "Some title");
        let b = article_id("https://example.com/b", "Some title");
        let c = article_id("https://example.com/a", "Other title");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = serde_json::to_value(sample_article()).unwrap();
        assert_eq!(json["category"], "technology");
        assert_eq!(json["country_focus"][0], "kenya");
        assert_eq!(json["is_breaking"], false);
        assert_eq!(json["engagement_score"], 5.0);
        assert_eq!(json["credibility_score"], 7.5);
        // chrono serializes published_at as an ISO-8601 string
        assert!(json["published_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_category_round_trip() {
        for category in [
            Category::General,
            Category::Technology,
            Category::Business,
            Category::Politics,
            Category::Sports,
            Category::Health,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }
}
