//! `!latest-airdrop` chat command.
//!
//! Re-fetches the directory, then walks channel details one request at a time
//! in listing order and stops at the first description mentioning "airdrop".

use std::sync::Arc;

use sentinel_common::error::AppError;
use sentinel_common::types::Channel;
use sentinel_directory::ChannelSource;

/// Literal command text, no arguments.
pub const LATEST_AIRDROP_COMMAND: &str = "!latest-airdrop";

/// Reply when the scan finds nothing.
pub const NO_AIRDROP_REPLY: &str = "No airdrop mentions found.";

const AIRDROP_MENTION: &str = "airdrop";

/// Handles inbound chat messages that may carry the command.
#[derive(Clone)]
pub struct CommandHandler {
    source: Arc<dyn ChannelSource>,
}

impl CommandHandler {
    pub fn new(source: Arc<dyn ChannelSource>) -> Self {
        Self { source }
    }

    /// Whether a message should trigger the command.
    ///
    /// Bot-authored messages never trigger, which keeps bots from answering
    /// each other.
    pub fn is_command(content: &str, author_is_bot: bool) -> bool {
        !author_is_bot && content == LATEST_AIRDROP_COMMAND
    }

    /// Handle one inbound message. Returns the reply text, or `None` if the
    /// message is not the command.
    pub async fn handle(&self, content: &str, author_is_bot: bool) -> Option<String> {
        if !Self::is_command(content, author_is_bot) {
            return None;
        }

        let reply = match self.find_latest_airdrop().await {
            Ok(Some(channel)) => format!(
                "Latest airdrop mention found in channel: {}\nDescription: {}",
                channel.name, channel.description
            ),
            Ok(None) => NO_AIRDROP_REPLY.to_string(),
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Error fetching data for command");
                format!("An error occurred while fetching data: {}", e)
            }
        };

        Some(reply)
    }

    /// Scan channel details for the first description containing "airdrop".
    ///
    /// The match is case-sensitive. Any fetch or format failure aborts the scan.
    pub async fn find_latest_airdrop(&self) -> Result<Option<Channel>, AppError> {
        let listing = self.source.list_channels().await?;
        if listing.is_missing() {
            return Err(AppError::Format(
                "Invalid data format from Warpcast API".to_string(),
            ));
        }

        let total = listing.channels.len();
        for (scanned, entry) in listing.channels.iter().enumerate() {
            let detail = self.source.get_channel(&entry.id).await?;
            if detail.description.contains(AIRDROP_MENTION) {
                tracing::info!(
                    channel_id = %detail.id,
                    scanned = scanned + 1,
                    total,
                    "Found airdrop mention"
                );
                return Ok(Some(detail));
            }
        }

        tracing::info!(scanned = total, "No airdrop mention in any channel");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_command_exact_literal() {
        assert!(CommandHandler::is_command("!latest-airdrop", false));
        assert!(!CommandHandler::is_command("!latest-airdrop ", false));
        assert!(!CommandHandler::is_command("!LATEST-AIRDROP", false));
        assert!(!CommandHandler::is_command("hello", false));
    }

    #[test]
    fn test_bot_authors_ignored() {
        assert!(!CommandHandler::is_command("!latest-airdrop", true));
    }
}
