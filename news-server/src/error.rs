use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use news_core::NewsError;
use serde_json::json;
use tracing::{error, info};

/// Service errors surfaced over HTTP.
#[derive(Debug)]
pub struct ApiError(pub NewsError);

impl From<NewsError> for ApiError {
    fn from(err: NewsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            NewsError::ArticleNotFound(_) | NewsError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, "NotFound")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            info!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        let body = json!({
            "error_type": error_type,
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
