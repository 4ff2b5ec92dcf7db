//! Warpcast channel directory access.
//!
//! `ChannelSource` is the seam the engine consumes; `DirectoryClient` is the
//! HTTP implementation.

pub mod client;

use async_trait::async_trait;

use sentinel_common::error::AppError;
use sentinel_common::types::{Channel, ChannelListing};

pub use client::DirectoryClient;

/// Anything that can enumerate channels and fetch a single channel's detail.
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// Fetch the full channel directory in listing order.
    async fn list_channels(&self) -> Result<ChannelListing, AppError>;

    /// Fetch one channel's detail record by id.
    async fn get_channel(&self, id: &str) -> Result<Channel, AppError>;
}
