use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use habari_core::{Article, Ranking};

use crate::AppState;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Case-insensitive filtering by category, country focus, and free-text
/// search over title + description.
fn filter_articles(articles: Vec<Article>, query: &NewsQuery) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|article| {
            if let Some(category) = &query.category {
                if !article.category.as_str().eq_ignore_ascii_case(category) {
                    return false;
                }
            }
            if let Some(country) = &query.country {
                if !article
                    .country_focus
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(country))
                {
                    return false;
                }
            }
            if let Some(search) = &query.search {
                let needle = search.to_lowercase();
                if !article.title.to_lowercase().contains(&needle)
                    && !article.description.to_lowercase().contains(&needle)
                {
                    return false;
                }
            }
            true
        })
        .collect()
}

struct PagedArticles {
    items: Vec<Article>,
    total: usize,
    page: usize,
    limit: usize,
    has_more: bool,
}

fn paginate(articles: Vec<Article>, query: &NewsQuery) -> PagedArticles {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let total = articles.len();
    let start = (page - 1) * limit;
    let items: Vec<Article> = articles.into_iter().skip(start).take(limit).collect();

    PagedArticles {
        items,
        total,
        page,
        limit,
        has_more: start + limit < total,
    }
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> impl IntoResponse {
    let ranking = query
        .sort
        .as_deref()
        .and_then(Ranking::from_param)
        .unwrap_or_default();

    let articles = state.service.articles(ranking).await;
    if articles.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "no articles available" })),
        );
    }

    let filtered = filter_articles(articles, &query);
    let paged = paginate(filtered, &query);

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "articles": paged.items,
            "total": paged.total,
            "page": paged.page,
            "limit": paged.limit,
            "has_more": paged.has_more,
            "last_updated": state.service.last_updated().await,
        })),
    )
}

pub async fn get_trending(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "trending_topics": state.service.trending().await,
        "last_updated": state.service.last_updated().await,
    }))
}

pub async fn get_sources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "sources": state.service.sources(),
    }))
}

pub async fn get_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let categories: BTreeSet<&'static str> = state
        .service
        .articles(Ranking::Recency)
        .await
        .iter()
        .map(|a| a.category.as_str())
        .collect();

    Json(json!({ "success": true, "categories": categories }))
}

pub async fn get_countries(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let countries: BTreeSet<String> = state
        .service
        .articles(Ranking::Recency)
        .await
        .into_iter()
        .flat_map(|a| a.country_focus)
        .collect();

    Json(json!({ "success": true, "countries": countries }))
}

pub async fn refresh_news(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let articles = state.service.refresh().await;
    Json(json!({
        "success": true,
        "articles_count": articles.len(),
        "last_updated": state.service.last_updated().await,
    }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "status": "healthy",
        "articles_cached": state.service.articles(Ranking::Recency).await.len(),
        "last_updated": state.service.last_updated().await,
        "timestamp": Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use habari_core::types::article_id;
    use habari_core::Category;

    fn article(title: &str, category: Category, country: &str) -> Article {
        Article {
            id: article_id("https://example.com", title),
            title: title.to_string(),
            description: format!("story about {title}"),
            content: String::new(),
            url: "https://example.com".to_string(),
            thumbnail: None,
            source: "Test".to_string(),
            category,
            country_focus: vec![country.to_string()],
            language: "en".to_string(),
            published_at: Utc::now(),
            is_breaking: false,
            is_trending: false,
            engagement_score: 5.0,
            credibility_score: 5.0,
        }
    }

    fn sample_batch() -> Vec<Article> {
        vec![
            article("Markets rally strongly", Category::Business, "kenya"),
            article("Cup final tonight", Category::Sports, "ghana"),
            article("Budget debate continues", Category::Politics, "kenya"),
        ]
    }

    #[test]
    fn test_filter_by_category_case_insensitive() {
        let query = NewsQuery {
            category: Some("BUSINESS".to_string()),
            ..NewsQuery::default()
        };
        let filtered = filter_articles(sample_batch(), &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Markets rally strongly");
    }

    #[test]
    fn test_filter_by_country() {
        let query = NewsQuery {
            country: Some("kenya".to_string()),
            ..NewsQuery::default()
        };
        assert_eq!(filter_articles(sample_batch(), &query).len(), 2);
    }

    #[test]
    fn test_filter_by_search_over_title_and_description() {
        let query = NewsQuery {
            search: Some("cup".to_string()),
            ..NewsQuery::default()
        };
        let filtered = filter_articles(sample_batch(), &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Cup final tonight");
    }

    #[test]
    fn test_filters_compose() {
        let query = NewsQuery {
            category: Some("politics".to_string()),
            country: Some("ghana".to_string()),
            ..NewsQuery::default()
        };
        assert!(filter_articles(sample_batch(), &query).is_empty());
    }

    #[test]
    fn test_paginate_pages_and_has_more() {
        let query = NewsQuery {
            page: Some(1),
            limit: Some(2),
            ..NewsQuery::default()
        };
        let paged = paginate(sample_batch(), &query);
        assert_eq!(paged.items.len(), 2);
        assert_eq!(paged.total, 3);
        assert!(paged.has_more);

        let query = NewsQuery {
            page: Some(2),
            limit: Some(2),
            ..NewsQuery::default()
        };
        let paged = paginate(sample_batch(), &query);
        assert_eq!(paged.items.len(), 1);
        assert!(!paged.has_more);
    }

    #[test]
    fn test_paginate_clamps_inputs() {
        let query = NewsQuery {
            page: Some(0),
            limit: Some(1000),
            ..NewsQuery::default()
        };
        let paged = paginate(sample_batch(), &query);
        assert_eq!(paged.page, 1);
        assert_eq!(paged.limit, MAX_PAGE_SIZE);
        assert_eq!(paged.items.len(), 3);
    }

    #[test]
    fn test_paginate_past_the_end() {
        let query = NewsQuery {
            page: Some(9),
            limit: Some(2),
            ..NewsQuery::default()
        };
        let paged = paginate(sample_batch(), &query);
        assert!(paged.items.is_empty());
        assert!(!paged.has_more);
    }
}
