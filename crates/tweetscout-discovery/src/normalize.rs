//! Raw tweet → candidate normalization.

use tweetscout_core::Candidate;

use crate::types::{AuthorInfluence, RawTweet};

/// Builds the normalized [`Candidate`] for a raw tweet that survived both
/// filters. Synthesizes the permalink when the gateway omitted one and
/// defaults the language to `"en"`.
#[must_use]
pub fn normalize_candidate(
    raw: &RawTweet,
    influence: AuthorInfluence,
    campaign_id: i64,
) -> Candidate {
    let url = raw.url.clone().unwrap_or_else(|| {
        format!("https://twitter.com/{}/status/{}", raw.author, raw.id)
    });

    Candidate {
        tweet_id: raw.id.clone(),
        campaign_id,
        author: raw.author.clone(),
        text: raw.text.clone(),
        created_at: raw.created_at,
        url,
        follower_count: influence.followers_count,
        verified: influence.verified,
        likes: raw.likes,
        retweets: raw.retweets,
        replies: raw.replies,
        language: raw.language.clone().unwrap_or_else(|| "en".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_tweet(url: Option<&str>, language: Option<&str>) -> RawTweet {
        RawTweet {
            id: "9001".to_string(),
            author: "gifter".to_string(),
            text: "need #gifts ideas".to_string(),
            created_at: "2026-08-05T10:00:00Z".parse().unwrap(),
            url: url.map(ToString::to_string),
            likes: 4,
            retweets: 2,
            replies: 1,
            language: language.map(ToString::to_string),
        }
    }

    #[test]
    fn keeps_gateway_permalink_when_present() {
        let candidate = normalize_candidate(
            &raw_tweet(Some("https://x.com/gifter/status/9001"), Some("de")),
            AuthorInfluence {
                followers_count: 5000,
                verified: true,
            },
            12,
        );
        assert_eq!(candidate.url, "https://x.com/gifter/status/9001");
        assert_eq!(candidate.language, "de");
        assert_eq!(candidate.campaign_id, 12);
        assert!(candidate.verified);
    }

    #[test]
    fn synthesizes_permalink_and_defaults_language() {
        let candidate = normalize_candidate(
            &raw_tweet(None, None),
            AuthorInfluence {
                followers_count: 100,
                verified: false,
            },
            3,
        );
        assert_eq!(candidate.url, "https://twitter.com/gifter/status/9001");
        assert_eq!(candidate.language, "en");
        assert_eq!(candidate.follower_count, 100);
    }
}
