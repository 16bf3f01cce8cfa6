use std::cmp::Reverse;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::article::{Article, Category, NewArticle};
use crate::error::NewsError;
use crate::store::Store;

pub const PERSONALIZED_LIMIT: usize = 10;
pub const DEFAULT_STREAM_CAPACITY: usize = 50;

/// Query operations over the article store plus the live broadcast that
/// stream subscribers attach to.
#[derive(Debug, Clone)]
pub struct NewsService {
    articles: Store<Article>,
    live_tx: broadcast::Sender<Article>,
}

impl NewsService {
    /// `capacity` bounds how far a stream subscriber may fall behind before
    /// it starts losing the oldest articles.
    pub fn new(articles: Store<Article>, capacity: usize) -> Self {
        let (live_tx, _) = broadcast::channel(capacity.max(1));
        Self { articles, live_tx }
    }

    pub fn store(&self) -> &Store<Article> {
        &self.articles
    }

    pub async fn all_news(&self) -> Vec<Article> {
        info!("listing all articles");
        let mut all = self.articles.values().await;
        sort_oldest_first(&mut all);
        debug!(count = all.len(), "all articles listed");
        all
    }

    /// Looks up one article and counts the read.
    pub async fn news_by_id(&self, id: u64) -> Result<Article, NewsError> {
        info!(id, "fetching article");
        let article = self
            .articles
            .update(id, |article| article.view_count += 1)
            .await
            .ok_or(NewsError::ArticleNotFound(id))?;
        info!(id, title = %article.title, views = article.view_count, "article fetched");
        Ok(article)
    }

    pub async fn news_by_category(&self, category: &str) -> Vec<Article> {
        info!(category, "listing articles by category");
        let Ok(wanted) = category.parse::<Category>() else {
            debug!(category, "unknown category, nothing matches");
            return Vec::new();
        };
        let mut matches: Vec<Article> = self
            .articles
            .values()
            .await
            .into_iter()
            .filter(|article| article.category == wanted)
            .collect();
        sort_oldest_first(&mut matches);
        matches
    }

    /// Case-insensitive substring search over title and content, newest first.
    pub async fn search(&self, keyword: &str) -> Vec<Article> {
        info!(keyword, "searching articles");
        let needle = keyword.to_lowercase();
        let mut matches: Vec<Article> = self
            .articles
            .values()
            .await
            .into_iter()
            .filter(|article| {
                article.title.to_lowercase().contains(&needle)
                    || article.content.to_lowercase().contains(&needle)
            })
            .collect();
        sort_oldest_first(&mut matches);
        matches.reverse();
        debug!(keyword, count = matches.len(), "search finished");
        matches
    }

    pub async fn popular(&self, limit: usize) -> Vec<Article> {
        info!(limit, "listing popular articles");
        let mut all = self.articles.values().await;
        all.sort_by_key(|article| (Reverse(article.view_count), article.id));
        all.truncate(limit);
        all
    }

    pub async fn personalized(&self, preferred: &[Category]) -> Vec<Article> {
        info!(?preferred, "listing personalized articles");
        self.all_news()
            .await
            .into_iter()
            .filter(|article| preferred.contains(&article.category))
            .take(PERSONALIZED_LIMIT)
            .collect()
    }

    pub async fn create(&self, draft: NewArticle) -> Article {
        info!(title = %draft.title, "creating article");
        let article = self
            .articles
            .insert_with(|id| draft.into_article(id, Utc::now()))
            .await;
        info!(id = article.id, "article created");
        article
    }

    /// Stores a generated article and fans it out to live subscribers.
    pub async fn publish(&self, article: Article) {
        self.articles.insert(article.clone()).await;
        // No receivers is not an error: the article is still stored.
        match self.live_tx.send(article) {
            Ok(receivers) => debug!(receivers, "article broadcast"),
            Err(_) => debug!("article stored with no live subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Article> {
        self.live_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.live_tx.receiver_count()
    }
}

fn sort_oldest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| a.published_at.cmp(&b.published_at).then(a.id.cmp(&b.id)));
}
