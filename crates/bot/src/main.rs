use std::sync::Arc;

use serenity::Client;
use tracing_subscriber::EnvFilter;

use sentinel_bot::context::BotContext;
use sentinel_bot::handler::{Handler, intents};
use sentinel_common::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "sentinel_bot=info,sentinel_engine=info,sentinel_directory=info,sentinel_notifier=info",
            )
        }))
        .json()
        .init();

    tracing::info!("Channel sentinel starting...");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let context = Arc::new(BotContext::from_config(&config));
    let handler = Handler::new(context.clone(), config.discord_channel_id);

    let mut client = Client::builder(&config.discord_bot_token, intents())
        .event_handler(handler)
        .await?;
    let shard_manager = client.shard_manager.clone();

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Discord client exited with error");
                context.stop().await;
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
            shard_manager.shutdown_all().await;
        }
    }

    context.stop().await;
    tracing::info!("Channel sentinel stopped.");
    Ok(())
}
