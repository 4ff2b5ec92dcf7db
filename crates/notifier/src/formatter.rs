//! Chat message templates.

use sentinel_common::types::Channel;

/// Render the keyword alert for a newly matched channel.
pub fn alert_message(channel: &Channel) -> String {
    format!(
        "🚨 New Airdrop or Token Launch Alert! 🚨\n\n\
         **Channel**: {}\n\
         **Description**: {}\n\
         **Link**: {}",
        channel.name, channel.description, channel.url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_message_template() {
        let channel = Channel::new(
            "drops",
            "drops",
            "Airdrop incoming!",
            "https://warpcast.com/~/channel/drops",
        );
        assert_eq!(
            alert_message(&channel),
            "🚨 New Airdrop or Token Launch Alert! 🚨\n\n\
             **Channel**: drops\n\
             **Description**: Airdrop incoming!\n\
             **Link**: https://warpcast.com/~/channel/drops"
        );
    }

    #[test]
    fn test_alert_message_with_empty_fields() {
        let channel = Channel::new("x", "giveaway", "", "");
        let message = alert_message(&channel);
        assert!(message.contains("**Channel**: giveaway\n"));
        assert!(message.ends_with("**Link**: "));
    }
}
