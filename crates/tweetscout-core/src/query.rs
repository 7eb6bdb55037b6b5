//! Campaign → search query construction.

use crate::Campaign;

/// Build the discovery search query for a campaign.
///
/// Joins the campaign's configured hashtags with `OR` for a broad search.
/// A campaign without hashtags is not searchable: this returns `None` and
/// the campaign is skipped for the run. There is deliberately no fallback to
/// keywords or the campaign name — an unsearchable campaign is a
/// configuration problem, not something to paper over with a guessed query.
#[must_use]
pub fn build_search_query(campaign: &Campaign) -> Option<String> {
    let terms: Vec<&str> = campaign
        .hashtags
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .collect();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" OR "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CampaignStatus;

    fn campaign_with_hashtags(hashtags: &[&str]) -> Campaign {
        Campaign {
            id: 1,
            name: "Holiday Gifts".to_string(),
            status: CampaignStatus::Active,
            channel: Some("TWITTER".to_string()),
            hashtags: hashtags.iter().map(ToString::to_string).collect(),
            keywords: vec!["presents".to_string()],
            search_mode: None,
            recency_window_minutes: None,
            min_followers: None,
            max_tweets_per_scan: None,
            config: serde_json::Map::new(),
        }
    }

    #[test]
    fn joins_hashtags_with_or() {
        let campaign = campaign_with_hashtags(&["#sale", "#deal", "#discount"]);
        assert_eq!(
            build_search_query(&campaign).as_deref(),
            Some("#sale OR #deal OR #discount")
        );
    }

    #[test]
    fn single_hashtag_has_no_join() {
        let campaign = campaign_with_hashtags(&["#handmade"]);
        assert_eq!(build_search_query(&campaign).as_deref(), Some("#handmade"));
    }

    #[test]
    fn no_hashtags_means_no_query_despite_keywords_and_name() {
        let campaign = campaign_with_hashtags(&[]);
        assert_eq!(build_search_query(&campaign), None);
    }

    #[test]
    fn whitespace_only_hashtags_are_ignored() {
        let campaign = campaign_with_hashtags(&["  ", ""]);
        assert_eq!(build_search_query(&campaign), None);
    }

    #[test]
    fn hashtags_are_trimmed() {
        let campaign = campaign_with_hashtags(&[" #sale ", "#deal"]);
        assert_eq!(
            build_search_query(&campaign).as_deref(),
            Some("#sale OR #deal")
        );
    }
}
