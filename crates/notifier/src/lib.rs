//! Alert delivery.
//!
//! `AlertPublisher` is what the poll cycle calls for each newly matched
//! channel. `DiscordPublisher` posts the alert to a fixed Discord channel.

pub mod discord;
pub mod formatter;

use async_trait::async_trait;

use sentinel_common::error::AppError;
use sentinel_common::types::Channel;

pub use discord::DiscordPublisher;

/// Delivers one alert for a matched channel.
///
/// Implementations do not retry; a returned error leaves the retry decision
/// to the caller.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, channel: &Channel) -> Result<(), AppError>;
}
