//! The two ranking policies used by the query layer: plain recency for
//! general listings, engagement-weighted for trending views.

use crate::types::Article;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ranking {
    /// Descending `published_at`.
    #[default]
    Recency,
    /// Descending `(engagement_score, published_at)`.
    Relevance,
}

impl Ranking {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "recency" => Some(Ranking::Recency),
            "relevance" => Some(Ranking::Relevance),
            _ => None,
        }
    }
}

pub fn sort_articles(articles: &mut [Article], ranking: Ranking) {
    match ranking {
        Ranking::Recency => {
            articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        }
        Ranking::Relevance => {
            articles.sort_by(|a, b| {
                b.engagement_score
                    .total_cmp(&a.engagement_score)
                    .then_with(|| b.published_at.cmp(&a.published_at))
            });
        }
    }
}
