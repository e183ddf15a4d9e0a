use std::{sync::Arc, time::Duration};

use anyhow::Context;
use billmart_widget::{
    config::Config,
    routes,
    services::{faq::FaqCatalog, webhook::RestWebhook},
    state::AppState,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let webhook = RestWebhook::new(config.webhook.clone()).context("building webhook client")?;
    tracing::info!(webhook = %webhook.url(), "relaying to conversational webhook");

    let state = Arc::new(AppState::new(FaqCatalog::default(), Arc::new(webhook), config.widget_ttl));
    state
        .widgets
        .spawn_reaper(config.widget_ttl.clamp(Duration::from_secs(1), Duration::from_secs(60)));

    let app = routes::create_router()
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "chat widget listening");
    axum::serve(listener, app).await?;
    Ok(())
}
