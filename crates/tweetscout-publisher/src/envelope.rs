//! Wire shapes for the two broker queues.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tweetscout_core::Candidate;

/// Primary queue for freshly discovered candidates.
pub const NEW_TWEETS_QUEUE: &str = "new_tweets";

/// Side channel receiving entire failed publish batches with error context.
pub const DEAD_LETTER_QUEUE: &str = "dead_letter";

/// One broker message: the candidate JSON keyed by tweet id, stamped with
/// the publish time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub key: String,
    pub payload: Vec<u8>,
    pub timestamp_ms: i64,
}

impl Envelope {
    /// Builds the envelope for a candidate.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the candidate cannot be encoded —
    /// in practice only on pathological float values, but the publisher
    /// treats it like any other batch failure.
    pub fn for_candidate(candidate: &Candidate) -> Result<Self, serde_json::Error> {
        Ok(Self {
            key: candidate.tweet_id.clone(),
            payload: serde_json::to_vec(candidate)?,
            timestamp_ms: Utc::now().timestamp_millis(),
        })
    }
}

/// A single record per failed batch — never one per tweet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetterRecord {
    pub campaign_id: i64,
    pub tweets: Vec<Candidate>,
    pub error: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

impl DeadLetterRecord {
    #[must_use]
    pub fn new(campaign_id: i64, tweets: Vec<Candidate>, error: String) -> Self {
        Self {
            campaign_id,
            tweets,
            error,
            timestamp: Utc::now(),
            service: "tweetscout".to_string(),
        }
    }
}
