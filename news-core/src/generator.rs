use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::article::{Article, Category};
use crate::error::NewsError;
use crate::news::{NewsService, DEFAULT_STREAM_CAPACITY};
use crate::seed::AUTHORS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub interval_ms: u64,
    /// Capacity of the live broadcast; lagging subscribers lose the oldest items.
    pub buffer_capacity: usize,
    /// When false, ticks with no live subscriber are skipped.
    pub generate_when_idle: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            buffer_capacity: DEFAULT_STREAM_CAPACITY,
            generate_when_idle: false,
        }
    }
}

impl GeneratorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

pub struct GeneratorHandle {
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl GeneratorHandle {
    pub async fn stop(self) -> Result<(), NewsError> {
        let _ = self.cancel_tx.send(());
        self.join.await.map_err(NewsError::from)
    }
}

pub fn spawn_generator(news: NewsService, config: GeneratorConfig) -> GeneratorHandle {
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
    let join = tokio::spawn(async move {
        let period = config.interval();
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_ms = config.interval_ms, "article generator started");

        loop {
            tokio::select! {
                _ = cancel_rx.recv() => {
                    info!("article generator shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    if !config.generate_when_idle && news.subscriber_count() == 0 {
                        debug!("no live subscribers, skipping tick");
                        continue;
                    }
                    generate_once(&news).await;
                }
            }
        }
    });

    GeneratorHandle { cancel_tx, join }
}

/// Synthesizes one article, stores it and broadcasts it.
pub async fn generate_once(news: &NewsService) -> Article {
    let id = news.store().next_id();
    let article = synthesize_article(&mut rand::thread_rng(), id, Utc::now());
    info!(id, title = %article.title, "generated article");
    news.publish(article.clone()).await;
    article
}

pub fn synthesize_article<R: Rng + ?Sized>(rng: &mut R, id: u64, now: DateTime<Utc>) -> Article {
    let category = *Category::ALL.choose(rng).unwrap_or(&Category::Tech);
    let author = *AUTHORS.choose(rng).unwrap_or(&AUTHORS[0]);
    Article {
        id,
        title: format!("[{category}] New story from {author} #{}", id % 1000),
        content: format!(
            "Detailed coverage from the {category} desk. This story was filed by {author}."
        ),
        category,
        author: author.to_owned(),
        published_at: now,
        view_count: 0,
        tags: vec![category.as_str().to_lowercase(), "live".to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn synthesized_article_follows_template() {
        let now = Utc::now();
        let article = synthesize_article(&mut StdRng::seed_from_u64(1), 1234, now);
        assert_eq!(article.id, 1234);
        assert_eq!(article.view_count, 0);
        assert_eq!(article.published_at, now);
        assert!(article
            .title
            .starts_with(&format!("[{}] New story from ", article.category)));
        assert!(article.title.ends_with("#234"));
        assert!(AUTHORS.contains(&article.author.as_str()));
        assert_eq!(article.tags[1], "live");
    }

    #[tokio::test]
    async fn stop_reports_a_panicked_task() {
        let (cancel_tx, _) = broadcast::channel(1);
        let join = tokio::spawn(async { panic!("generator blew up") });
        let handle = GeneratorHandle { cancel_tx, join };
        assert!(matches!(handle.stop().await, Err(NewsError::Task(_))));
    }
}
