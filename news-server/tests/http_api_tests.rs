mod common;

use chrono::Utc;
use news_core::{Article, Category, StreamConfig, User};
use reqwest::StatusCode;
use serde_json::json;

use common::spawn_server;

#[tokio::test]
async fn list_all_is_oldest_first() {
    let server = spawn_server(StreamConfig::default()).await;
    let articles: Vec<Article> = reqwest::get(server.url("/api/news"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(articles.len(), 5);
    for pair in articles.windows(2) {
        assert!(pair[0].published_at <= pair[1].published_at);
    }
}

#[tokio::test]
async fn get_by_id_counts_views_and_404s_unknown() {
    let server = spawn_server(StreamConfig::default()).await;
    let before = server.news.store().get(2).await.unwrap().view_count;

    let first: Article = reqwest::get(server.url("/api/news/2"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Article = reqwest::get(server.url("/api/news/2"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.view_count, before + 1);
    assert_eq!(second.view_count, before + 2);

    let missing = reqwest::get(server.url("/api/news/999")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = missing.json().await.unwrap();
    assert_eq!(body["error_type"], "NotFound");

    let malformed = reqwest::get(server.url("/api/news/abc")).await.unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_limit_three_returns_top_seeded_views() {
    let server = spawn_server(StreamConfig::default()).await;
    let mut seeds = server.news.store().values().await;
    seeds.sort_by(|a, b| b.view_count.cmp(&a.view_count).then(a.id.cmp(&b.id)));

    let top: Vec<Article> = reqwest::get(server.url("/api/news/popular?limit=3"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<u64> = top.iter().map(|a| a.id).collect();
    let expected: Vec<u64> = seeds.iter().take(3).map(|a| a.id).collect();
    assert_eq!(ids, expected);

    let default_limit: Vec<Article> = reqwest::get(server.url("/api/news/popular"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(default_limit.len(), 5);
}

#[tokio::test]
async fn search_and_category_ignore_case() {
    let server = spawn_server(StreamConfig::default()).await;
    let lower: Vec<Article> = reqwest::get(server.url("/api/news/search?keyword=world"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let upper: Vec<Article> = reqwest::get(server.url("/api/news/search?keyword=WORLD"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(lower.len(), 1);
    assert_eq!(lower, upper);

    let missing_keyword = reqwest::get(server.url("/api/news/search")).await.unwrap();
    assert_eq!(missing_keyword.status(), StatusCode::BAD_REQUEST);

    let science: Vec<Article> = reqwest::get(server.url("/api/news/category/science"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(science.len(), 1);
    assert_eq!(science[0].category, Category::Science);
}

#[tokio::test]
async fn create_assigns_id_views_and_timestamp() {
    let server = spawn_server(StreamConfig::default()).await;
    let before = Utc::now();
    let response = reqwest::Client::new()
        .post(server.url("/api/news"))
        .json(&json!({"title":"X","content":"Y","category":"TECH","author":"Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: Article = response.json().await.unwrap();
    assert!(created.id > 5);
    assert_eq!(created.view_count, 0);
    assert!(created.published_at >= before);
    assert_eq!(created.title, "X");

    let unknown_category = reqwest::Client::new()
        .post(server.url("/api/news"))
        .json(&json!({"title":"X","content":"Y","category":"WEATHER","author":"Z"}))
        .send()
        .await
        .unwrap();
    assert!(unknown_category.status().is_client_error());
}

#[tokio::test]
async fn personalized_uses_stored_preferences() {
    let server = spawn_server(StreamConfig::default()).await;
    let picks: Vec<Article> = reqwest::get(server.url("/api/news/personalized/3"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(picks.len(), 2);
    assert!(picks
        .iter()
        .all(|a| matches!(a.category, Category::Politics | Category::Entertainment)));

    // Unknown users fall back to TECH.
    let fallback: Vec<Article> = reqwest::get(server.url("/api/news/personalized/404"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].category, Category::Tech);
}

#[tokio::test]
async fn user_routes_expose_user_operations() {
    let server = spawn_server(StreamConfig::default()).await;
    let users: Vec<User> = reqwest::get(server.url("/api/users"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.len(), 3);

    let user: User = reqwest::get(server.url("/api/users/2"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(user.username, "sportsfan");

    let missing = reqwest::get(server.url("/api/users/99")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let created: User = reqwest::Client::new()
        .post(server.url("/api/users"))
        .json(&json!({"username":"reader","email":"r@example.com","preferredCategories":["science"]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.preferred_categories, vec![Category::Science]);
}
