//! Authenticated gateway session.

use chrono::{DateTime, Utc};

/// Bearer session handed out by the gateway login endpoint.
///
/// Owned by the [`crate::DiscoveryClient`] behind a `tokio::sync::Mutex`,
/// created on first use, shared read-only across campaigns within a run,
/// and invalidated only on authentication failure.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub token: String,
    pub acquired_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(token: String) -> Self {
        Self {
            token,
            acquired_at: Utc::now(),
        }
    }
}
