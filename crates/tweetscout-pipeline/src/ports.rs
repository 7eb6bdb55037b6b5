//! Collaborator ports consumed by the orchestrator.
//!
//! Each port has one production implementation; tests substitute in-memory
//! doubles. Failure postures differ deliberately: the campaign source and
//! discovery surface their errors to the orchestrator, while the seen store
//! and sink absorb theirs (fail-open and dead-letter respectively).

use async_trait::async_trait;

use tweetscout_cache::SeenCache;
use tweetscout_campaigns::CampaignClient;
use tweetscout_core::{Campaign, Candidate, SearchMode};
use tweetscout_discovery::{AuthorInfluence, DiscoveryClient, DiscoveryError, RawTweet};
use tweetscout_publisher::{Broker, TweetPublisher};

/// Read-only view of the campaign-service collaborator.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    async fn active_campaigns(&self) -> anyhow::Result<Vec<Campaign>>;
}

/// The content-discovery capability: bounded search plus per-author
/// influence lookup. `DiscoveryError::Auth` means the shared session is
/// gone and the rest of the run's discovery work cannot proceed.
#[async_trait]
pub trait Discovery: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        mode: SearchMode,
    ) -> Result<Vec<RawTweet>, DiscoveryError>;

    async fn author_influence(&self, handle: &str) -> Result<AuthorInfluence, DiscoveryError>;
}

/// Dedup state shared by all campaigns. Both operations are infallible from
/// the orchestrator's point of view: reads fail open, writes are
/// logged-only.
#[async_trait]
pub trait SeenStore: Send + Sync {
    async fn filter_unseen(&self, candidates: Vec<Candidate>) -> Vec<Candidate>;
    async fn mark_seen(&self, candidates: &[Candidate], campaign_id: i64) -> usize;
}

/// Downstream delivery. Returns the number of candidates published; `0`
/// means the batch failed (the dead-letter attempt already happened).
#[async_trait]
pub trait CandidateSink: Send + Sync {
    async fn publish(&self, campaign_id: i64, candidates: &[Candidate]) -> usize;
}

// The service keeps a second handle on the publisher to close the broker
// at shutdown, so the sink is shared.
#[async_trait]
impl<T: CandidateSink> CandidateSink for std::sync::Arc<T> {
    async fn publish(&self, campaign_id: i64, candidates: &[Candidate]) -> usize {
        T::publish(self, campaign_id, candidates).await
    }
}

#[async_trait]
impl CampaignSource for CampaignClient {
    async fn active_campaigns(&self) -> anyhow::Result<Vec<Campaign>> {
        Ok(CampaignClient::active_campaigns(self).await?)
    }
}

#[async_trait]
impl Discovery for DiscoveryClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        mode: SearchMode,
    ) -> Result<Vec<RawTweet>, DiscoveryError> {
        DiscoveryClient::search(self, query, limit, mode).await
    }

    async fn author_influence(&self, handle: &str) -> Result<AuthorInfluence, DiscoveryError> {
        DiscoveryClient::author_influence(self, handle).await
    }
}

#[async_trait]
impl SeenStore for SeenCache {
    async fn filter_unseen(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        SeenCache::filter_unseen(self, candidates).await
    }

    async fn mark_seen(&self, candidates: &[Candidate], campaign_id: i64) -> usize {
        SeenCache::mark_seen(self, candidates, campaign_id).await
    }
}

#[async_trait]
impl<B: Broker> CandidateSink for TweetPublisher<B> {
    async fn publish(&self, campaign_id: i64, candidates: &[Candidate]) -> usize {
        TweetPublisher::publish(self, campaign_id, candidates).await
    }
}
