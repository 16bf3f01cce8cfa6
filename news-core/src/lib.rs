pub mod article;
pub mod config;
pub mod error;
pub mod generator;
pub mod news;
pub mod pressure;
pub mod seed;
pub mod store;
pub mod user;
pub mod users;

pub use article::{Article, Category, NewArticle};
pub use config::{AppConfig, ServerConfig, StreamConfig};
pub use error::NewsError;
pub use generator::{generate_once, spawn_generator, GeneratorConfig, GeneratorHandle};
pub use news::NewsService;
pub use pressure::test_feed;
pub use store::{Keyed, Store};
pub use user::{NewUser, User};
pub use users::UserService;

/// Builds both services over freshly seeded stores.
pub fn seeded_services(capacity: usize) -> (NewsService, UserService) {
    let now = chrono::Utc::now();
    let articles = seed::seed_articles(&mut rand::thread_rng(), now);
    let users = seed::seed_users(now);
    (
        NewsService::new(Store::seeded(articles), capacity),
        UserService::new(Store::seeded(users)),
    )
}
