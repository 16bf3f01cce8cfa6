//! Long-lived responses: SSE article streams and the delayed JSON array listing.

use std::convert::Infallible;
use std::time::Duration;

use async_stream::stream;
use axum::{
    body::Body,
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures_util::Stream;
use news_core::Article;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Logs when a stream's response body is dropped, i.e. the client went away
/// or the server is shutting down.
struct StreamGuard {
    name: &'static str,
}

impl StreamGuard {
    fn open(name: &'static str) -> Self {
        info!(stream = name, "client subscribed");
        Self { name }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        info!(stream = self.name, "client subscription ended");
    }
}

/// Turns a broadcast receiver into an SSE response. A subscriber that falls
/// behind the buffer loses the oldest articles and keeps going.
pub fn article_events(
    name: &'static str,
    mut rx: broadcast::Receiver<Article>,
    mut shutdown: watch::Receiver<bool>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = stream! {
        let _guard = StreamGuard::open(name);
        loop {
            let received = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!(stream = name, "closing stream for shutdown");
                        break;
                    }
                    continue;
                }
                received = rx.recv() => received,
            };
            match received {
                Ok(article) => {
                    debug!(stream = name, id = article.id, "sending article");
                    yield Event::default().id(article.id.to_string()).json_data(&article);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(stream = name, skipped, "subscriber lagging, dropped oldest articles");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Streams `articles` as one JSON array, flushing each element after `delay`.
/// The array is closed even when shutdown cuts the listing short, so the body
/// always parses.
pub fn delayed_json_array(
    articles: Vec<Article>,
    delay: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Response {
    let chunks = stream! {
        let _guard = StreamGuard::open("slow");
        yield Ok::<_, Infallible>(String::from("["));
        let mut first = true;
        for article in articles {
            let interrupted = tokio::select! {
                _ = tokio::time::sleep(delay) => false,
                _ = shutdown.changed() => true,
            };
            if interrupted {
                debug!("slow listing cut short by shutdown");
                break;
            }
            match serde_json::to_string(&article) {
                Ok(element) => {
                    let chunk = if first { element } else { format!(",{element}") };
                    first = false;
                    debug!(id = article.id, "slow listing emitted article");
                    yield Ok(chunk);
                }
                Err(err) => warn!(error = %err, id = article.id, "failed to encode article"),
            }
        }
        yield Ok(String::from("]"));
    };
    (
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(chunks),
    )
        .into_response()
}
