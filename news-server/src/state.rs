use news_core::{NewsService, StreamConfig, UserService};
use tokio::sync::watch;

/// Shared by every handler; cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub news: NewsService,
    pub users: UserService,
    pub streams: StreamConfig,
    /// Flips to `true` when the server is shutting down so open streams end.
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(
        news: NewsService,
        users: UserService,
        streams: StreamConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            news,
            users,
            streams,
            shutdown,
        }
    }
}
