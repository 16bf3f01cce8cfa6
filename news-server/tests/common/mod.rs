#![allow(dead_code)]

use futures_util::StreamExt;
use news_core::{seeded_services, Article, NewsService, StreamConfig};
use news_server::{serve, AppState};
use tokio::net::TcpListener;
use tokio::sync::watch;

pub struct TestServer {
    pub base: String,
    pub news: NewsService,
    pub shutdown: watch::Sender<bool>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub async fn spawn_server(streams: StreamConfig) -> TestServer {
    let (news, users) = seeded_services(50);
    let (shutdown, shutdown_rx) = watch::channel(false);
    let state = AppState::new(news.clone(), users, streams, shutdown_rx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, state, std::future::pending()));

    TestServer {
        base: format!("http://{addr}"),
        news,
        shutdown,
    }
}

/// Reads SSE frames from `response` until `count` `data:` payloads arrived.
pub async fn read_sse_articles(response: reqwest::Response, count: usize) -> Vec<Article> {
    let mut body = response.bytes_stream();
    let mut buffer = String::new();
    let mut articles = Vec::new();

    while articles.len() < count {
        let chunk = body
            .next()
            .await
            .expect("stream ended early")
            .expect("stream error");
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(end) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..end + 2).collect();
            for line in frame.lines() {
                if let Some(data) = line.strip_prefix("data:") {
                    articles.push(serde_json::from_str(data.trim()).expect("article json"));
                }
            }
        }
    }
    articles
}
