//! Keyword matcher: decides whether a channel looks like an airdrop or
//! token-launch announcement.
//!
//! Matching is a case-insensitive substring test of each keyword against the
//! channel's name and description. Absent fields are treated as empty.

use sentinel_common::types::Channel;

/// Keywords that flag a channel for alerting.
pub const KEYWORDS: [&str; 4] = ["airdrop", "token launch", "new token", "giveaway"];

/// Stateless keyword matcher over the fixed keyword set.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl KeywordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if any keyword appears in the channel's name or description.
    pub fn matches(&self, channel: &Channel) -> bool {
        self.matched_keyword(channel).is_some()
    }

    /// The first keyword (in `KEYWORDS` order) found in the channel, if any.
    pub fn matched_keyword(&self, channel: &Channel) -> Option<&'static str> {
        let name = channel.name.to_lowercase();
        let description = channel.description.to_lowercase();

        KEYWORDS
            .iter()
            .copied()
            .find(|keyword| description.contains(*keyword) || name.contains(*keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(name: &str, description: &str) -> Channel {
        Channel::new("id", name, description, "")
    }

    #[test]
    fn test_description_keyword_matches() {
        let matcher = KeywordMatcher::new();
        assert!(matcher.matches(&channel("drops", "Airdrop incoming!")));
    }

    #[test]
    fn test_name_keyword_matches_case_insensitive() {
        let matcher = KeywordMatcher::new();
        assert!(matcher.matches(&channel("GIVEAWAY Hub", "")));
        assert_eq!(
            matcher.matched_keyword(&channel("GIVEAWAY Hub", "")),
            Some("giveaway")
        );
    }

    #[test]
    fn test_multi_word_keywords() {
        let matcher = KeywordMatcher::new();
        assert!(matcher.matches(&channel("launchpad", "Next Token Launch friday")));
        assert!(matcher.matches(&channel("alpha", "a NEW TOKEN every day")));
        // Words present but not adjacent do not count.
        assert!(!matcher.matches(&channel("alpha", "new shiny token")));
    }

    #[test]
    fn test_no_keyword_does_not_match() {
        let matcher = KeywordMatcher::new();
        assert!(!matcher.matches(&channel("general", "chat")));
        assert_eq!(matcher.matched_keyword(&channel("general", "chat")), None);
    }

    #[test]
    fn test_empty_fields_do_not_match() {
        let matcher = KeywordMatcher::new();
        assert!(!matcher.matches(&Channel::default()));
    }

    #[test]
    fn test_substring_inside_word_matches() {
        let matcher = KeywordMatcher::new();
        assert!(matcher.matches(&channel("airdrops", "")));
    }

    #[test]
    fn test_property_matches_iff_some_keyword_present() {
        let fillers = ["", "hello", "Weekly AMA", "tokens", "drop"];
        for keyword in KEYWORDS {
            for filler in fillers {
                let upper = keyword.to_uppercase();
                let in_name = channel(&format!("{}{}", filler, upper), filler);
                let in_description = channel(filler, &format!("{} {}", filler, keyword));
                assert!(KeywordMatcher.matches(&in_name), "{:?}", in_name);
                assert!(KeywordMatcher.matches(&in_description), "{:?}", in_description);
            }
        }
        for filler in fillers {
            assert!(!KeywordMatcher.matches(&channel(filler, filler)));
        }
    }
}
