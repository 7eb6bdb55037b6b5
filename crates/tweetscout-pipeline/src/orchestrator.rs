//! The scout run: per-campaign stage machine plus run-level accounting.

use std::time::Instant;

use chrono::Utc;

use tweetscout_core::{build_search_query, AppConfig, Campaign};
use tweetscout_discovery::DiscoveryError;

use crate::filters::{filter_by_influence, filter_recent};
use crate::ports::{CampaignSource, CandidateSink, Discovery, SeenStore};
use crate::run_lock::RunLock;
use crate::summary::RunSummary;

/// Run-level knobs, resolved from [`AppConfig`] at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_tweets_per_campaign: usize,
    pub recency_window_minutes: i64,
    pub min_followers: u64,
    pub inter_campaign_delay_ms: u64,
}

impl PipelineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_tweets_per_campaign: config.max_tweets_per_campaign,
            recency_window_minutes: config.recency_window_minutes,
            min_followers: config.min_followers,
            inter_campaign_delay_ms: config.inter_campaign_delay_ms,
        }
    }
}

/// Result of a run trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// A run was already in flight; this trigger was skipped, not queued.
    Skipped,
}

/// How far a single campaign got.
enum CampaignOutcome {
    /// Campaign was not searchable (no query); excluded from the processed
    /// count.
    Skipped,
    Processed { found: usize, published: usize },
}

/// A campaign that failed mid-stage. `auth` marks discovery-session
/// failures, which poison the rest of the run's discovery work.
struct CampaignFailure {
    auth: bool,
    error: anyhow::Error,
}

impl CampaignFailure {
    fn from_discovery(error: DiscoveryError) -> Self {
        Self {
            auth: matches!(error, DiscoveryError::Auth(_)),
            error: error.into(),
        }
    }
}

/// Orchestrates one scout pass over all active campaigns.
///
/// Campaigns are processed strictly sequentially with a short pause in
/// between, to bound burst load on the shared discovery session. A failure
/// in one campaign never aborts the run; only the summary records it.
pub struct ScoutPipeline<S, D, C, P> {
    campaigns: S,
    discovery: D,
    seen: C,
    sink: P,
    config: PipelineConfig,
    lock: RunLock,
}

impl<S, D, C, P> ScoutPipeline<S, D, C, P>
where
    S: CampaignSource,
    D: Discovery,
    C: SeenStore,
    P: CandidateSink,
{
    pub fn new(campaigns: S, discovery: D, seen: C, sink: P, config: PipelineConfig) -> Self {
        Self {
            campaigns,
            discovery,
            seen,
            sink,
            config,
            lock: RunLock::new(),
        }
    }

    /// `true` when no run is in flight. Shutdown uses this to let an
    /// in-flight run finish before tearing collaborators down.
    pub fn is_idle(&self) -> bool {
        !self.lock.is_locked()
    }

    /// Executes one run, unless another run is already in flight.
    pub async fn run(&self) -> RunOutcome {
        let Some(_guard) = self.lock.try_acquire() else {
            tracing::warn!("scout run already in flight; skipping overlapping trigger");
            return RunOutcome::Skipped;
        };

        let started = Instant::now();
        tracing::info!("scout run starting");

        let mut summary = RunSummary::default();

        // Fail-soft: an unreachable campaign source yields an empty run and
        // the next interval tries again.
        let campaigns = match self.campaigns.active_campaigns().await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch active campaigns");
                Vec::new()
            }
        };

        if campaigns.is_empty() {
            tracing::info!("no active campaigns; nothing to scout");
            summary.duration = started.elapsed();
            return RunOutcome::Completed(summary);
        }

        tracing::info!(count = campaigns.len(), "processing active campaigns");

        let mut discovery_down = false;
        let total = campaigns.len();

        for (index, campaign) in campaigns.iter().enumerate() {
            tracing::info!(
                campaign_id = campaign.id,
                campaign_name = %campaign.name,
                "processing campaign"
            );

            match self.process_campaign(campaign, discovery_down).await {
                Ok(CampaignOutcome::Skipped) => {}
                Ok(CampaignOutcome::Processed { found, published }) => {
                    summary.campaigns_processed += 1;
                    summary.total_found += found;
                    summary.total_published += published;
                }
                Err(failure) => {
                    summary.campaigns_failed += 1;
                    if failure.auth {
                        discovery_down = true;
                    }
                    tracing::error!(
                        campaign_id = campaign.id,
                        campaign_name = %campaign.name,
                        error = %failure.error,
                        "campaign processing failed"
                    );
                }
            }

            // Pause between campaigns to stay under the discovery source's
            // rate limits.
            if index + 1 < total && self.config.inter_campaign_delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.config.inter_campaign_delay_ms,
                ))
                .await;
            }
        }

        summary.duration = started.elapsed();
        tracing::info!(
            campaigns_processed = summary.campaigns_processed,
            campaigns_failed = summary.campaigns_failed,
            total_found = summary.total_found,
            total_published = summary.total_published,
            duration_secs = summary.duration.as_secs_f64(),
            "scout run complete"
        );

        RunOutcome::Completed(summary)
    }

    /// Runs one campaign through the stage machine. Each stage that yields
    /// nothing terminates the campaign early with its own logged reason;
    /// candidates are marked seen only after their batch is confirmed
    /// published.
    async fn process_campaign(
        &self,
        campaign: &Campaign,
        discovery_down: bool,
    ) -> Result<CampaignOutcome, CampaignFailure> {
        if discovery_down {
            return Err(CampaignFailure {
                auth: false,
                error: anyhow::anyhow!("discovery session unavailable for the rest of this run"),
            });
        }

        let Some(query) = build_search_query(campaign) else {
            tracing::warn!(
                campaign_id = campaign.id,
                "no search query could be built; skipping campaign"
            );
            return Ok(CampaignOutcome::Skipped);
        };
        tracing::info!(campaign_id = campaign.id, query = %query, "search query built");

        let limit = campaign.effective_scan_limit(self.config.max_tweets_per_campaign);
        let mode = campaign.effective_search_mode();
        let raw = self
            .discovery
            .search(&query, limit, mode)
            .await
            .map_err(CampaignFailure::from_discovery)?;

        let found = raw.len();
        if raw.is_empty() {
            tracing::info!(campaign_id = campaign.id, "no raw tweets found");
            return Ok(CampaignOutcome::Processed {
                found: 0,
                published: 0,
            });
        }

        let window = campaign.effective_recency_window_minutes(self.config.recency_window_minutes);
        let recent = filter_recent(raw, Utc::now(), window);
        if recent.is_empty() {
            tracing::info!(
                campaign_id = campaign.id,
                found,
                window_minutes = window,
                "no tweets within the recency window"
            );
            return Ok(CampaignOutcome::Processed {
                found,
                published: 0,
            });
        }

        let threshold = campaign.effective_min_followers(self.config.min_followers);
        let qualified = filter_by_influence(&self.discovery, &recent, threshold, campaign.id)
            .await
            .map_err(CampaignFailure::from_discovery)?;
        if qualified.is_empty() {
            tracing::info!(
                campaign_id = campaign.id,
                found,
                threshold,
                "no tweets above the influence threshold"
            );
            return Ok(CampaignOutcome::Processed {
                found,
                published: 0,
            });
        }

        let unseen = self.seen.filter_unseen(qualified).await;
        if unseen.is_empty() {
            tracing::info!(campaign_id = campaign.id, found, "no unseen tweets");
            return Ok(CampaignOutcome::Processed {
                found,
                published: 0,
            });
        }

        let published = self.sink.publish(campaign.id, &unseen).await;
        if published == 0 {
            // The batch is in the dead-letter queue (or logged as lost);
            // leaving it unmarked keeps it eligible for the next run.
            tracing::warn!(
                campaign_id = campaign.id,
                count = unseen.len(),
                "publish failed; batch not marked seen"
            );
            return Ok(CampaignOutcome::Processed {
                found,
                published: 0,
            });
        }

        self.seen.mark_seen(&unseen, campaign.id).await;

        tracing::info!(campaign_id = campaign.id, found, published, "campaign complete");
        Ok(CampaignOutcome::Processed { found, published })
    }
}
