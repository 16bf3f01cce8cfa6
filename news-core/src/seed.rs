//! Fixed sample data loaded at startup.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::article::{Article, Category};
use crate::user::User;

pub const AUTHORS: [&str; 5] = [
    "Reporter Kim",
    "Reporter Lee",
    "Reporter Park",
    "Reporter Choi",
    "Reporter Jung",
];

const SEED_ARTICLES: [(&str, &str, Category); 5] = [
    (
        "Mastering reactive web services",
        "A new paradigm for reactive programming",
        Category::Tech,
    ),
    (
        "World cup final highlights",
        "The fiercest match in history",
        Category::Sports,
    ),
    (
        "New policy announced",
        "The announcement is drawing national attention",
        Category::Politics,
    ),
    (
        "Blockbuster film opens",
        "Critics call it the best release of the year",
        Category::Entertainment,
    ),
    (
        "Breakthrough scientific discovery",
        "Research results tipped for a Nobel prize",
        Category::Science,
    ),
];

/// Articles 1..=5, one per category. Publication times are one minute apart
/// and end at `now`; view counts are drawn from `[100, 1000)`.
pub fn seed_articles<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Article> {
    let count = SEED_ARTICLES.len() as i64;
    SEED_ARTICLES
        .iter()
        .zip(AUTHORS)
        .enumerate()
        .map(|(idx, ((title, content, category), author))| Article {
            id: idx as u64 + 1,
            title: (*title).to_owned(),
            content: (*content).to_owned(),
            category: *category,
            author: author.to_owned(),
            published_at: now - Duration::minutes(count - 1 - idx as i64),
            view_count: rng.gen_range(100..1000),
            tags: Vec::new(),
        })
        .collect()
}

pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    let user = |id, username: &str, email: &str, preferred: Vec<Category>| User {
        id,
        username: username.to_owned(),
        email: email.to_owned(),
        preferred_categories: preferred,
        created_at: now,
        last_active_at: now,
    };

    vec![
        user(
            1,
            "techuser",
            "tech@example.com",
            vec![Category::Tech, Category::Science],
        ),
        user(2, "sportsfan", "sports@example.com", vec![Category::Sports]),
        user(
            3,
            "newsaddict",
            "news@example.com",
            vec![Category::Politics, Category::Entertainment],
        ),
    ]
}
