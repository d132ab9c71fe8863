use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tokio::{net::TcpListener, sync::Notify};
use tracing_subscriber::EnvFilter;

use libs::util;

use picture_api::{
    CONFIG, api,
    common::{AppState, metrics},
    db::PictureStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LOG_LEVEL"))
        .init();

    let store = PictureStore::load(&CONFIG.backend_data_file)
        .with_context(|| format!("loading pictures from {}", CONFIG.backend_data_file))?;
    let state = AppState {
        store: store.clone(),
        status_mode: CONFIG.backend_status_mode,
    };
    tracing::info!(mode = ?state.status_mode, "status convention");

    let api_router = api::app(state);
    let metrics_router = metrics::prometheus_router()?;

    metrics::spawn_system_metrics(
        store,
        Duration::from_secs(CONFIG.prometheus_refresh_interval.max(1)),
    );

    let shutdown_notify = Arc::new(Notify::new());
    tokio::spawn(util::listen_for_shutdown(shutdown_notify.clone()));

    let api_listener = TcpListener::bind(format!("0.0.0.0:{}", CONFIG.backend_port)).await?;
    let metrics_listener = TcpListener::bind(format!("0.0.0.0:{}", CONFIG.prometheus_port)).await?;

    tracing::info!("⇢ API listening on: http://{}", api_listener.local_addr()?);
    tracing::info!(
        "⇢ Metrics listening on: http://{}/metrics",
        metrics_listener.local_addr()?
    );

    let api_server = axum::serve(api_listener, api_router).with_graceful_shutdown({
        let n = shutdown_notify.clone();
        async move { n.notified().await }
    });
    let metrics_server = axum::serve(metrics_listener, metrics_router).with_graceful_shutdown({
        let n = shutdown_notify.clone();
        async move { n.notified().await }
    });

    tokio::try_join!(api_server, metrics_server)?;

    Ok(())
}
