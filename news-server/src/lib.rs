pub mod api;
pub mod error;
pub mod functional;
pub mod state;
pub mod streams;

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use functional::NewsHandler;
pub use state::AppState;

/// Both route styles over one shared state.
pub fn router(state: AppState) -> Router {
    let handler = NewsHandler::new(state.news.clone(), state.shutdown.clone());
    Router::new()
        .merge(api::routes())
        .merge(functional::routes(handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
