// WhisperZen - inspirational quotes on a timer
// Entry point: runs the quote engine headless until interrupted

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whisperzen::app;
use whisperzen::services::LogNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whisperzen=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WhisperZen");

    let data_dir = app::default_data_dir()?;
    let state = app::setup(data_dir, Arc::new(LogNotifier)).await?;

    // Log sink needs no user consent
    state.rotation.set_notification_permission(true).await;

    let current = state.engine.current_quote().await;
    tracing::info!("Current quote [{}]: {}", current.category, current.share_text());

    if state.preferences.get().use_online_quotes {
        if let Err(e) = state.engine.fetch_online_quote().await {
            tracing::warn!("Initial online fetch failed: {}", e);
        }
    }

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    state.rotation.shutdown().await;

    Ok(())
}
