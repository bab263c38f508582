use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use habari_core::Result;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/api/trending", get(handlers::get_trending))
        .route("/api/sources", get(handlers::get_sources))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/countries", get(handlers::get_countries))
        .route("/api/refresh", post(handlers::refresh_news))
        .route("/api/health", get(handlers::health_check))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "🌍 query API listening");
    axum::serve(listener, app)
        .await
        .map_err(habari_core::Error::Io)?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use habari_core::{Article, Error, Result};
}
