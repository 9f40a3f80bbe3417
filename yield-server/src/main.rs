use anyhow::Context;
use tracing::info;
use yield_server::api::app_router;
use yield_server::build_state;
use yield_server::config::Config;
use yield_server::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    init_logging(config.log_format)?;

    let state = build_state(&config).await?;
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
