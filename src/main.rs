use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use payment_result::config::AppConfig;
use payment_result::routes::build_router;
use payment_result::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!("✅ App config loaded");
    tracing::info!("🌐 Backend: {}", config.backend_base_url);
    if config.vnpay_hash_secret.is_none() {
        tracing::warn!("VNPAY_HASH_SECRET not set, callback signatures will not be verified");
    }

    let app_state = AppState::new(config.clone()).context("Failed to initialize services")?;
    app_state.views.spawn_sweeper(config.view_ttl);

    let app = build_router(app_state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Payment result service listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
