use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId, Http};

use sentinel_common::error::AppError;
use sentinel_common::types::Channel;

use crate::AlertPublisher;
use crate::formatter::alert_message;

/// Posts keyword alerts to a single Discord text channel.
#[derive(Clone)]
pub struct DiscordPublisher {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordPublisher {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        Self {
            http,
            channel_id: ChannelId::new(channel_id),
        }
    }
}

#[async_trait]
impl AlertPublisher for DiscordPublisher {
    async fn publish(&self, channel: &Channel) -> Result<(), AppError> {
        let target = self.channel_id.to_channel(&self.http).await.map_err(|e| {
            AppError::Publish(format!(
                "failed to resolve Discord channel {}: {}",
                self.channel_id, e
            ))
        })?;

        target
            .id()
            .say(&self.http, alert_message(channel))
            .await
            .map_err(|e| {
                AppError::Publish(format!(
                    "failed to send alert to Discord channel {}: {}",
                    self.channel_id, e
                ))
            })?;

        tracing::info!(
            channel_id = %channel.id,
            discord_channel = %self.channel_id,
            "Alert delivered"
        );
        Ok(())
    }
}
