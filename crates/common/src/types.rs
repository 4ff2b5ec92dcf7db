use serde::{Deserialize, Serialize};

/// A Warpcast channel as returned by the directory and detail endpoints.
///
/// Only the fields the sentinel reads are kept; absent fields deserialize
/// to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Channel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Whether the directory response carried the channel array at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingShape {
    /// `result.channels` was present (possibly empty).
    Complete,
    /// The body parsed but `result.channels` was absent.
    MissingChannels,
}

impl std::fmt::Display for ListingShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingShape::Complete => write!(f, "complete"),
            ListingShape::MissingChannels => write!(f, "missing_channels"),
        }
    }
}

/// Result of one directory fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelListing {
    pub channels: Vec<Channel>,
    pub shape: ListingShape,
}

impl ChannelListing {
    pub fn complete(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            shape: ListingShape::Complete,
        }
    }

    pub fn missing() -> Self {
        Self {
            channels: Vec::new(),
            shape: ListingShape::MissingChannels,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.shape == ListingShape::MissingChannels
    }

    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_null_fields_become_empty() {
        let channel: Channel =
            serde_json::from_value(serde_json::json!({"id": "abc", "description": null}))
                .unwrap();
        assert_eq!(channel.id, "abc");
        assert_eq!(channel.name, "");
        assert_eq!(channel.description, "");
        assert_eq!(channel.url, "");
    }

    #[test]
    fn test_null_id_becomes_empty() {
        let channel: Channel =
            serde_json::from_value(serde_json::json!({"id": null, "name": "ghost"})).unwrap();
        assert_eq!(channel.id, "");
        assert_eq!(channel.name, "ghost");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "id": "memes",
            "name": "Memes",
            "description": "all the memes",
            "url": "https://warpcast.com/~/channel/memes",
            "imageUrl": "https://example.com/m.png",
            "followerCount": 12000
        }))
        .unwrap();
        assert_eq!(channel.name, "Memes");
        assert_eq!(channel.url, "https://warpcast.com/~/channel/memes");
    }

    #[test]
    fn test_missing_listing_is_empty() {
        let listing = ChannelListing::missing();
        assert!(listing.is_missing());
        assert!(listing.into_channels().is_empty());
    }
}
