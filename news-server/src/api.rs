//! `/api/news` and `/api/users`: one extractor-based handler per route.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use news_core::{test_feed, Article, NewArticle, NewUser, User};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::streams::{article_events, delayed_json_array};

pub const DEFAULT_POPULAR_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<usize>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/news", get(all_news).post(create_news))
        .route("/api/news/stream", get(news_stream))
        .route("/api/news/stream-backpressure", get(backpressure_stream))
        .route("/api/news/slow", get(slow_news))
        .route("/api/news/search", get(search_news))
        .route("/api/news/popular", get(popular_news))
        .route("/api/news/category/{category}", get(news_by_category))
        .route("/api/news/personalized/{user_id}", get(personalized_news))
        .route("/api/news/{id}", get(news_by_id))
        .route("/api/users", get(all_users).post(create_user))
        .route("/api/users/{id}", get(user_by_id))
}

/// GET /api/news
async fn all_news(State(state): State<AppState>) -> Json<Vec<Article>> {
    info!("GET /api/news");
    Json(state.news.all_news().await)
}

/// GET /api/news/{id}
async fn news_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Article>, ApiError> {
    info!(id, "GET /api/news/{{id}}");
    Ok(Json(state.news.news_by_id(id).await?))
}

/// GET /api/news/category/{category}
async fn news_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Article>> {
    info!(category = %category, "GET /api/news/category/{{category}}");
    Json(state.news.news_by_category(&category).await)
}

/// GET /api/news/stream
async fn news_stream(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/news/stream");
    article_events("news", state.news.subscribe(), state.shutdown.clone())
}

/// GET /api/news/personalized/{user_id}
async fn personalized_news(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Json<Vec<Article>> {
    info!(user_id, "GET /api/news/personalized/{{user_id}}");
    let preferred = state.users.preferences(user_id).await;
    Json(state.news.personalized(&preferred).await)
}

/// GET /api/news/search?keyword=
async fn search_news(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Article>> {
    info!(keyword = %params.keyword, "GET /api/news/search");
    Json(state.news.search(&params.keyword).await)
}

/// GET /api/news/popular?limit=
async fn popular_news(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Json<Vec<Article>> {
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    info!(limit, "GET /api/news/popular");
    Json(state.news.popular(limit).await)
}

/// POST /api/news
async fn create_news(
    State(state): State<AppState>,
    Json(draft): Json<NewArticle>,
) -> Json<Article> {
    info!(title = %draft.title, "POST /api/news");
    Json(state.news.create(draft).await)
}

/// GET /api/news/slow
async fn slow_news(State(state): State<AppState>) -> Response {
    info!("GET /api/news/slow");
    let articles = state.news.all_news().await;
    delayed_json_array(articles, state.streams.slow_delay(), state.shutdown.clone())
}

/// GET /api/news/stream-backpressure
async fn backpressure_stream(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/news/stream-backpressure");
    let rx = test_feed(
        state.streams.backpressure_interval(),
        state.streams.backpressure_buffer,
    );
    article_events("backpressure", rx, state.shutdown.clone())
}

/// GET /api/users
async fn all_users(State(state): State<AppState>) -> Json<Vec<User>> {
    info!("GET /api/users");
    Json(state.users.all_users().await)
}

/// GET /api/users/{id}
async fn user_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    info!(id, "GET /api/users/{{id}}");
    Ok(Json(state.users.user_by_id(id).await?))
}

/// POST /api/users
async fn create_user(State(state): State<AppState>, Json(draft): Json<NewUser>) -> Json<User> {
    info!(username = %draft.username, "POST /api/users");
    Json(state.users.create_user(draft).await)
}
