use async_trait::async_trait;
use serde_json::Value;

use sentinel_common::error::AppError;
use sentinel_common::types::{Channel, ChannelListing};

use crate::ChannelSource;

/// HTTP client for the Warpcast channel directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn all_channels_url(&self) -> String {
        format!("{}/v2/all-channels", self.base_url)
    }

    fn channel_url(&self, id: &str) -> String {
        format!("{}/v1/channel/{}", self.base_url, id)
    }

    /// GET a URL and decode its body as JSON, mapping a non-success status
    /// to `AppError::Fetch(status_message)`.
    async fn get_json(&self, url: &str, status_message: String) -> Result<Value, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("{}: {}", status_message, e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Directory request failed");
            return Err(AppError::Fetch(status_message));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Format(format!("Response body is not valid JSON: {}", e)))
    }
}

#[async_trait]
impl ChannelSource for DirectoryClient {
    async fn list_channels(&self) -> Result<ChannelListing, AppError> {
        let body = self
            .get_json(&self.all_channels_url(), "Failed to fetch channels".to_string())
            .await?;
        let listing = parse_listing(body)?;

        tracing::debug!(
            channels = listing.channels.len(),
            shape = %listing.shape,
            "Fetched channel directory"
        );
        Ok(listing)
    }

    async fn get_channel(&self, id: &str) -> Result<Channel, AppError> {
        let body = self
            .get_json(
                &self.channel_url(id),
                format!("Failed to fetch data for channel {}", id),
            )
            .await?;
        parse_detail(body)
    }
}

/// Decode a `/v2/all-channels` body: `{ result: { channels: [Channel] } }`.
///
/// A missing `result.channels` is reported through the listing shape, not as
/// an error. A `channels` value that is not an array of channel objects is a
/// format error. Entries without an id are dropped with a warning.
pub fn parse_listing(body: Value) -> Result<ChannelListing, AppError> {
    let channels = match body.get("result").and_then(|r| r.get("channels")) {
        Some(Value::Null) | None => return Ok(ChannelListing::missing()),
        Some(channels) => channels.clone(),
    };

    let channels: Vec<Channel> = serde_json::from_value(channels).map_err(|e| {
        AppError::Format(format!("Invalid data format from Warpcast API: {}", e))
    })?;

    let (channels, unnamed): (Vec<Channel>, Vec<Channel>) =
        channels.into_iter().partition(|c| !c.id.is_empty());
    if !unnamed.is_empty() {
        tracing::warn!(skipped = unnamed.len(), "Skipping directory entries without an id");
    }

    Ok(ChannelListing::complete(channels))
}

/// Decode a `/v1/channel/{id}` body: `{ result: { channel: Channel } }`.
pub fn parse_detail(body: Value) -> Result<Channel, AppError> {
    let invalid =
        || AppError::Format("Invalid data format from Warpcast API for channel".to_string());

    let channel = body
        .get("result")
        .and_then(|r| r.get("channel"))
        .filter(|c| c.is_object())
        .ok_or_else(invalid)?;

    serde_json::from_value(channel.clone()).map_err(|_| invalid())
}
