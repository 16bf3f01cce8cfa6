//! Synthetic high-frequency feed used to illustrate a bounded buffer between
//! a fast producer and a slow consumer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::article::{Article, Category};

pub fn test_article(seq: u64, now: DateTime<Utc>) -> Article {
    Article {
        id: seq,
        title: format!("Backpressure test article {seq}"),
        content: format!("Synthetic payload number {seq} for buffer testing."),
        category: Category::Tech,
        author: "test-feed".to_owned(),
        published_at: now,
        view_count: 0,
        tags: vec!["test".to_owned()],
    }
}

/// Spawns a producer that emits one test article every `interval` into a
/// buffer of `capacity`. When the consumer lags, the oldest buffered articles
/// are dropped. The producer exits once the returned receiver is dropped.
pub fn test_feed(interval: Duration, capacity: usize) -> broadcast::Receiver<Article> {
    let (tx, rx) = broadcast::channel(capacity.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut seq = 0u64;
        loop {
            ticker.tick().await;
            if tx.send(test_article(seq, Utc::now())).is_err() {
                info!(emitted = seq, "test feed consumer gone, stopping producer");
                break;
            }
            debug!(seq, "test feed emitted");
            seq += 1;
        }
    });
    rx
}
