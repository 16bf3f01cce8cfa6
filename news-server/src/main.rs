use anyhow::Context;
use news_core::{seeded_services, spawn_generator, AppConfig};
use news_server::{serve, AppState};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let (news, users) = seeded_services(config.generator.buffer_capacity);
    let seeded = news.store().len().await;
    info!(articles = seeded, "seed data loaded");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let generator = spawn_generator(news.clone(), config.generator.clone());
    let state = AppState::new(news, users, config.streams.clone(), shutdown_rx);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve(listener, state, async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
        }
        info!("shutdown requested");
        let _ = shutdown_tx.send(true);
    })
    .await
    .context("server error")?;

    generator.stop().await.context("generator did not stop cleanly")?;
    info!("server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
