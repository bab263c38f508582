//! Trending-topic extraction: frequency analysis of the words appearing
//! across a batch of articles.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Article;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("invalid word regex"));

const STOP_WORDS: &[&str] = &[
    "news", "said", "says", "after", "will", "also", "been", "have", "were",
    "this", "that", "with", "from", "they", "more", "would", "could", "than",
    "what", "when", "where", "while", "about",
];

/// Count topic words across titles and descriptions and return the top
/// `top_n` as (word, count), most frequent first. Ties are broken by
/// word order so the output is deterministic.
pub fn trending_topics(articles: &[Article], top_n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for article in articles {
        let text = format!("{} {}", article.title, article.description).to_lowercase();
        for word in WORD_RE.find_iter(&text) {
            let word = word.as_str();
            if STOP_WORDS.contains(&word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    let mut topics: Vec<(String, usize)> = counts.into_iter().collect();
    topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    topics.truncate(top_n);
    topics
}
