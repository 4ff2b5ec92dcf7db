use std::path::PathBuf;

use crate::error::AppError;

/// Default Warpcast API base URL.
pub const DEFAULT_WARPCAST_API_URL: &str = "https://api.warpcast.com";

/// Default poll interval in seconds (10 minutes).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default location of the notified-channel id file.
pub const DEFAULT_NOTIFIED_CHANNELS_FILE: &str = "notified_channels.json";

/// Global application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Discord bot token used to log in to the gateway
    pub discord_bot_token: String,

    /// Discord channel that receives keyword alerts
    pub discord_channel_id: u64,

    /// Base URL of the Warpcast channel directory API
    pub warpcast_api_url: String,

    /// Poll interval in seconds (default: 600)
    pub poll_interval_secs: u64,

    /// Path of the JSON file holding already-alerted channel ids
    pub notified_channels_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_error = |msg: &str| AppError::Config(msg.to_string());

        let discord_bot_token = lookup("DISCORD_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| config_error("DISCORD_BOT_TOKEN environment variable is required"))?;

        let discord_channel_id = lookup("DISCORD_CHANNEL_ID")
            .ok_or_else(|| config_error("DISCORD_CHANNEL_ID environment variable is required"))?
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| config_error("DISCORD_CHANNEL_ID must be a non-zero u64"))?;

        let poll_interval_secs = lookup("POLL_INTERVAL_SECS")
            .unwrap_or_else(|| DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| config_error("POLL_INTERVAL_SECS must be a positive u64"))?;

        Ok(Self {
            discord_bot_token,
            discord_channel_id,
            warpcast_api_url: lookup("WARPCAST_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_WARPCAST_API_URL.to_string()),
            poll_interval_secs,
            notified_channels_file: lookup("NOTIFIED_CHANNELS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTIFIED_CHANNELS_FILE)),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("discord_bot_token", &"<redacted>")
            .field("discord_channel_id", &self.discord_channel_id)
            .field("warpcast_api_url", &self.warpcast_api_url)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("notified_channels_file", &self.notified_channels_file)
            .finish()
    }
}
