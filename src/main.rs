use counter_dashboard::client::HttpCounterSource;
use counter_dashboard::{router, AppState, Config, Dashboard};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let source = HttpCounterSource::new(&config.counter_url, config.request_timeout)?;
    let dashboard = Dashboard::new(Arc::new(source), config.renderer(), config.timings())
        .with_viewport(config.viewport_width)
        .await;

    info!(counter_url = %config.counter_url, "polling counter service");
    let poller = dashboard.start();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(AppState::new(dashboard)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.cancel();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
