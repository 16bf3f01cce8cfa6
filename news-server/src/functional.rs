//! `/functional/news`: a handler object bound to a route table with request
//! predicates. Handlers receive the raw request and pull path variables and
//! bodies out of it themselves.

use axum::{
    extract::{FromRequest, Path, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, RequestExt, Router,
};
use news_core::{NewArticle, NewsService};
use tokio::sync::watch;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::streams::article_events;

const APPLICATION_JSON: &str = "application/json";
const TEXT_EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Clone)]
pub struct NewsHandler {
    news: NewsService,
    shutdown: watch::Receiver<bool>,
}

impl NewsHandler {
    pub fn new(news: NewsService, shutdown: watch::Receiver<bool>) -> Self {
        Self { news, shutdown }
    }

    pub async fn all_news(self, req: Request) -> Response {
        if let Err(rejected) = require_accept(req.headers(), APPLICATION_JSON) {
            return rejected;
        }
        info!("handler: listing all articles");
        Json(self.news.all_news().await).into_response()
    }

    pub async fn news_by_id(self, mut req: Request) -> Response {
        if let Err(rejected) = require_accept(req.headers(), APPLICATION_JSON) {
            return rejected;
        }
        let id = match req.extract_parts::<Path<u64>>().await {
            Ok(Path(id)) => id,
            Err(rejection) => return rejection.into_response(),
        };
        info!(id, "handler: fetching article");
        match self.news.news_by_id(id).await {
            Ok(article) => Json(article).into_response(),
            Err(err) => ApiError::from(err).into_response(),
        }
    }

    pub async fn create_news(self, req: Request) -> Response {
        info!("handler: creating article");
        let draft = match Json::<NewArticle>::from_request(req, &()).await {
            Ok(Json(draft)) => draft,
            Err(rejection) => return rejection.into_response(),
        };
        let created = self.news.create(draft).await;
        info!(id = created.id, "handler: article created");
        Json(created).into_response()
    }

    pub async fn news_stream(self, req: Request) -> Response {
        if let Err(rejected) = require_accept(req.headers(), TEXT_EVENT_STREAM) {
            return rejected;
        }
        info!("handler: opening article stream");
        article_events("functional", self.news.subscribe(), self.shutdown).into_response()
    }

    pub async fn news_by_category(self, mut req: Request) -> Response {
        if let Err(rejected) = require_accept(req.headers(), APPLICATION_JSON) {
            return rejected;
        }
        let category = match req.extract_parts::<Path<String>>().await {
            Ok(Path(category)) => category,
            Err(rejection) => return rejection.into_response(),
        };
        info!(category = %category, "handler: listing articles by category");
        Json(self.news.news_by_category(&category).await).into_response()
    }
}

macro_rules! bind {
    ($handler:expr, $method:ident) => {{
        let handler = $handler.clone();
        move |req: Request| handler.clone().$method(req)
    }};
}

pub fn routes(handler: NewsHandler) -> Router<AppState> {
    info!("initialising functional news routes");
    Router::new()
        .route(
            "/functional/news",
            get(bind!(handler, all_news)).post(bind!(handler, create_news)),
        )
        .route("/functional/news/stream", get(bind!(handler, news_stream)))
        .route(
            "/functional/news/category/{category}",
            get(bind!(handler, news_by_category)),
        )
        .route("/functional/news/{id}", get(bind!(handler, news_by_id)))
}

/// Accepts when the header is absent, lists `mime`, or lists a wildcard that
/// covers it.
pub fn accepts(headers: &HeaderMap, mime: &str) -> bool {
    let Some(value) = headers.get(header::ACCEPT) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let major = mime.split('/').next().unwrap_or_default();
    value
        .split(',')
        .map(|item| item.split(';').next().unwrap_or_default().trim())
        .any(|item| {
            item == mime
                || item == "*/*"
                || item
                    .strip_suffix("/*")
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(major))
                || item.eq_ignore_ascii_case(mime)
        })
}

fn require_accept(headers: &HeaderMap, mime: &str) -> Result<(), Response> {
    if accepts(headers, mime) {
        Ok(())
    } else {
        info!(required = mime, "request does not accept required media type");
        Err(StatusCode::NOT_ACCEPTABLE.into_response())
    }
}
