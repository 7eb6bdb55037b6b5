//! Global search defaults.
//!
//! Fallback values used when a campaign carries no override of its own and
//! no value was supplied through the environment. Resolution order for each
//! knob is channel config → campaign field → these constants (see
//! [`crate::Campaign`]).

/// Hard cap on candidates fetched per campaign scan, regardless of
/// campaign configuration.
pub const MAX_TWEETS_PER_SCAN: usize = 100;

/// Recency window in minutes: only tweets younger than this are considered.
pub const RECENCY_WINDOW_MINUTES: i64 = 180;

/// Minimum author follower count for a tweet to qualify.
pub const MIN_FOLLOWERS: u64 = 150_000;

/// Time-to-live for seen-cache records, in seconds (24 hours).
pub const SEEN_TTL_SECS: u64 = 86_400;
