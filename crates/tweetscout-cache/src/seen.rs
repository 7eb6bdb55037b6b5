//! Redis-backed seen cache.
//!
//! A live `tweet:seen:<tweetId>` key means that tweet must not be
//! republished by any campaign until the key expires (24 hours after the
//! write). Both operations are pipelined batches. The failure posture is
//! asymmetric on purpose: a read error treats every candidate as unseen
//! (a possible duplicate publish is preferable to a silent drop), and a
//! write error only costs a possible re-publish on a later run —
//! downstream consumers are at-least-once anyway.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tweetscout_core::{defaults, Candidate};

use crate::error::CacheError;

const SEEN_KEY_PREFIX: &str = "tweet:seen:";

/// Value stored for each seen tweet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeenRecord {
    campaign_id: i64,
    first_seen: DateTime<Utc>,
}

/// Client for the shared seen-tweet store.
///
/// Cheap to clone; connections are established per batch operation through
/// the multiplexed async connection of the underlying client.
#[derive(Clone)]
pub struct SeenCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl SeenCache {
    /// Creates a cache client with the default 24 h record TTL.
    ///
    /// The connection is lazy: an unreachable store surfaces per operation
    /// (and fails open), not at construction.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Redis`] if `redis_url` cannot be parsed.
    pub fn new(redis_url: &str) -> Result<Self, CacheError> {
        Self::with_ttl(redis_url, defaults::SEEN_TTL_SECS)
    }

    /// Creates a cache client with an explicit record TTL (tests).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Redis`] if `redis_url` cannot be parsed.
    pub fn with_ttl(redis_url: &str, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client, ttl_secs })
    }

    /// Returns the subset of `candidates` with no live seen record.
    ///
    /// On any store error the full input is returned unchanged (fail-open).
    pub async fn filter_unseen(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.is_empty() {
            return candidates;
        }

        match self.check_seen(&candidates).await {
            Ok(seen_flags) => {
                let total = candidates.len();
                let unseen: Vec<Candidate> = candidates
                    .into_iter()
                    .zip(seen_flags)
                    .filter_map(|(candidate, seen)| (!seen).then_some(candidate))
                    .collect();

                let seen_count = total - unseen.len();
                if seen_count > 0 {
                    tracing::info!(
                        seen = seen_count,
                        unseen = unseen.len(),
                        "filtered out already-seen tweets"
                    );
                }
                unseen
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    count = candidates.len(),
                    "seen-cache check failed; treating all candidates as unseen"
                );
                candidates
            }
        }
    }

    /// Marks `candidates` as seen for `campaign_id`, TTL 24 h from now.
    ///
    /// Candidates without a tweet id are skipped with a warning. Store
    /// errors are logged and swallowed; returns the number of records
    /// written (0 on failure).
    pub async fn mark_seen(&self, candidates: &[Candidate], campaign_id: i64) -> usize {
        if candidates.is_empty() {
            return 0;
        }

        match self.write_seen(candidates, campaign_id).await {
            Ok(written) => {
                tracing::info!(count = written, campaign_id, "marked tweets as seen");
                written
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    count = candidates.len(),
                    campaign_id,
                    "failed to mark tweets as seen"
                );
                0
            }
        }
    }

    async fn check_seen(&self, candidates: &[Candidate]) -> Result<Vec<bool>, CacheError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let mut pipe = redis::pipe();
        for candidate in candidates {
            pipe.exists(seen_key(&candidate.tweet_id));
        }
        let flags: Vec<bool> = pipe.query_async(&mut conn).await?;
        Ok(flags)
    }

    async fn write_seen(
        &self,
        candidates: &[Candidate],
        campaign_id: i64,
    ) -> Result<usize, CacheError> {
        let record = SeenRecord {
            campaign_id,
            first_seen: Utc::now(),
        };
        let payload = serde_json::to_string(&record)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "seen record", e.to_string())))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let mut pipe = redis::pipe();
        let mut written = 0usize;
        for candidate in candidates {
            if candidate.tweet_id.is_empty() {
                tracing::warn!(campaign_id, "tweet missing id, skipping seen record");
                continue;
            }
            pipe.set_ex(seen_key(&candidate.tweet_id), &payload, self.ttl_secs);
            written += 1;
        }

        if written > 0 {
            let _: () = pipe.query_async(&mut conn).await?;
        }
        Ok(written)
    }
}

fn seen_key(tweet_id: &str) -> String {
    format!("{SEEN_KEY_PREFIX}{tweet_id}")
}
