//! Qualified tweet candidates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discovered tweet that survived the recency and influence filters.
///
/// Candidates are created during influence filtering, checked against the
/// seen cache, and terminally either published to the broker or dropped with
/// a logged reason. The scout never persists them itself; the serialized form
/// (including `campaign_id`) is the broker payload consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub tweet_id: String,
    pub campaign_id: i64,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub follower_count: u64,
    pub verified: bool,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub language: String,
}
