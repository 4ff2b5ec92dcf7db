use std::sync::Arc;

use serenity::all::{Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::async_trait;

use sentinel_notifier::DiscordPublisher;

use crate::context::BotContext;

/// Gateway intents needed to read guild message content.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Serenity event handler bridging gateway events to the `BotContext`.
pub struct Handler {
    context: Arc<BotContext>,
    alert_channel_id: u64,
}

impl Handler {
    pub fn new(context: Arc<BotContext>, alert_channel_id: u64) -> Self {
        Self {
            context,
            alert_channel_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Logged in to Discord"
        );

        let publisher = Arc::new(DiscordPublisher::new(ctx.http.clone(), self.alert_channel_id));
        self.context.start(publisher).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(reply) = self
            .context
            .commands()
            .handle(&msg.content, msg.author.bot)
            .await
        else {
            return;
        };

        tracing::debug!(
            channel = %msg.channel_id,
            author = %msg.author.name,
            "Answering !latest-airdrop"
        );

        if let Err(e) = msg.channel_id.say(&ctx.http, reply).await {
            tracing::error!(
                channel = %msg.channel_id,
                error = %e,
                "Failed to send command reply"
            );
        }
    }
}
