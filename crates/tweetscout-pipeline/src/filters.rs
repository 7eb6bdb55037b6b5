//! Recency and influence filtering stages.
//!
//! Ordering matters: recency runs first so the (expensive, rate-limited)
//! influence lookup is only paid for tweets that are still fresh.

use chrono::{DateTime, Duration, Utc};

use tweetscout_core::Candidate;
use tweetscout_discovery::{normalize_candidate, DiscoveryError, RawTweet};

use crate::ports::Discovery;

/// Keeps tweets created at or after `now - window_minutes`.
///
/// The cutoff is inclusive: a tweet exactly `window_minutes` old survives.
#[must_use]
pub fn filter_recent(
    raw: Vec<RawTweet>,
    now: DateTime<Utc>,
    window_minutes: i64,
) -> Vec<RawTweet> {
    let cutoff = now - Duration::minutes(window_minutes);
    let total = raw.len();
    let recent: Vec<RawTweet> = raw.into_iter().filter(|t| t.created_at >= cutoff).collect();

    let dropped = total - recent.len();
    if dropped > 0 {
        tracing::debug!(dropped, window_minutes, "dropped stale tweets");
    }
    recent
}

/// Looks up author influence for each recency survivor and keeps those at
/// or above `threshold`, normalized into [`Candidate`] records.
///
/// Lookups run one candidate at a time against the shared session. A
/// lookup timeout or error drops that single candidate with a logged
/// reason and processing continues — except authentication failure, which
/// is returned to the caller because no further lookup can succeed this
/// run.
///
/// # Errors
///
/// Returns [`DiscoveryError::Auth`] when the discovery session was
/// rejected mid-run. All other lookup errors are absorbed per candidate.
pub async fn filter_by_influence<D: Discovery + ?Sized>(
    discovery: &D,
    raw: &[RawTweet],
    threshold: u64,
    campaign_id: i64,
) -> Result<Vec<Candidate>, DiscoveryError> {
    let mut qualified = Vec::new();

    for tweet in raw {
        match discovery.author_influence(&tweet.author).await {
            Ok(influence) if influence.followers_count >= threshold => {
                qualified.push(normalize_candidate(tweet, influence, campaign_id));
            }
            Ok(influence) => {
                tracing::debug!(
                    author = %tweet.author,
                    followers = influence.followers_count,
                    threshold,
                    "dropping tweet: below threshold"
                );
            }
            Err(err @ DiscoveryError::Auth(_)) => return Err(err),
            Err(e) => {
                tracing::warn!(
                    author = %tweet.author,
                    tweet_id = %tweet.id,
                    error = %e,
                    "dropping tweet: influence lookup failed"
                );
            }
        }
    }

    Ok(qualified)
}
