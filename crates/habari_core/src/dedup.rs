//! Near-duplicate suppression over a batch of articles. Titles are
//! normalized and compared by word overlap; the first-seen article of
//! each cluster survives, preserving batch order.

use std::collections::HashSet;

use crate::types::Article;

/// Word-overlap ratio above which two titles count as the same story.
pub const SIMILARITY_THRESHOLD: f32 = 0.8;

/// Lowercase, strip punctuation, collapse whitespace.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Overlap between two normalized titles: |intersection| divided by the
/// larger word-set size. Zero when either side has no words, so a title
/// that normalizes to nothing never matches anything.
pub fn title_similarity(a: &str, b: &str) -> f32 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let overlap = words_a.intersection(&words_b).count();
    overlap as f32 / words_a.len().max(words_b.len()) as f32
}

/// Drop every article whose normalized title overlaps a previously seen
/// one by more than [`SIMILARITY_THRESHOLD`]. Stable: survivors keep
/// their relative order. O(n²) in batch size, which is fine for the
/// tens-to-hundreds of articles a run produces.
pub fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_titles: Vec<String> = Vec::new();
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let normalized = normalize_title(&article.title);
        let duplicate = seen_titles
            .iter()
            .any(|seen| title_similarity(&normalized, seen) > SIMILARITY_THRESHOLD);

        if !duplicate {
            seen_titles.push(normalized);
            unique.push(article);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{article_id, Category};
    use chrono::Utc;

    fn article_with_title(title: &str) -> Article {
        Article {
            id: article_id("https://example.com", title),
            title: title.to_string(),
            description: String::new(),
            content: String::new(),
            url: "https://example.com".to_string(),
            thumbnail: None,
            source: "Test".to_string(),
            category: Category::General,
            country_focus: vec!["kenya".to_string()],
            language: "en".to_string(),
            published_at: Utc::now(),
            is_breaking: false,
            is_trending: false,
            engagement_score: 5.0,
            credibility_score: 5.0,
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            normalize_title("Hello, World!  Extra   spaces"),
            "hello world extra spaces"
        );
    }

    #[test]
    fn test_similarity_identical_and_disjoint() {
        assert_eq!(title_similarity("kenya election results", "kenya election results"), 1.0);
        assert_eq!(title_similarity("kenya election", "ghana economy"), 0.0);
    }

    #[test]
    fn test_similarity_empty_is_zero() {
        assert_eq!(title_similarity("", "kenya election"), 0.0);
        assert_eq!(title_similarity("", ""), 0.0);
    }

    #[test]
    fn test_near_duplicate_dropped() {
        let first = article_with_title("Kenya election results announced today");
        let near = article_with_title("Kenya election results announced today update");
        let kept = dedup_articles(vec![first.clone(), near]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, first.title);
    }

    #[test]
    fn test_distinct_titles_survive() {
        let articles = vec![
            article_with_title("Kenya election results announced"),
            article_with_title("Nigeria unveils new budget plan"),
            article_with_title("Ghana launches vaccination drive"),
        ];
        assert_eq!(dedup_articles(articles).len(), 3);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let articles = vec![
            article_with_title("Alpha story about markets"),
            article_with_title("Beta story about weather"),
            article_with_title("Gamma story about energy"),
        ];
        let kept = dedup_articles(articles);
        let titles: Vec<_> = kept.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Alpha story about markets",
                "Beta story about weather",
                "Gamma story about energy",
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let articles = vec![
            article_with_title("Kenya election results announced today"),
            article_with_title("Kenya election results announced today update"),
            article_with_title("Nigeria unveils new budget plan"),
        ];
        let once = dedup_articles(articles);
        let twice = dedup_articles(once.clone());
        let ids = |batch: &[Article]| batch.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_punctuation_only_titles_always_kept() {
        let articles = vec![article_with_title("???"), article_with_title("!!!")];
        assert_eq!(dedup_articles(articles).len(), 2);
    }
}
