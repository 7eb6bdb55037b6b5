//! Wire types for the discovery gateway.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A tweet as returned by the gateway search endpoint, before filtering
/// and normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTweet {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub language: Option<String>,
}

/// Author influence data from the gateway profile endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfluence {
    pub followers_count: u64,
    #[serde(default)]
    pub verified: bool,
}

/// One page of search results.
///
/// Tweets arrive as raw JSON values so a single malformed entry can be
/// skipped without discarding the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub tweets: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}
