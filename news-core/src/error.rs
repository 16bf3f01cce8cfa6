use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("article not found: {0}")]
    ArticleNotFound(u64),
    #[error("user not found: {0}")]
    UserNotFound(u64),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("generator task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("config io error: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
