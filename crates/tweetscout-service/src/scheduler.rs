//! Scout job scheduling.
//!
//! Derives a cron schedule from the configured interval and registers the
//! scout run on a [`JobScheduler`]. Overlap protection lives in the
//! pipeline's run lock, so a slow run simply causes the next trigger to be
//! skipped.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use tweetscout_pipeline::{CampaignSource, CandidateSink, Discovery, ScoutPipeline, SeenStore};

/// Derives a 6-field cron expression from an interval in minutes.
///
/// Sub-hour intervals fire every N minutes; whole-hour intervals fire every
/// H hours. Awkward intervals (e.g. 90 minutes) fall back to every 30
/// minutes, matching the upstream scheduler's behaviour.
pub fn cron_expression(interval_minutes: u64) -> String {
    if interval_minutes < 60 {
        return format!("0 */{interval_minutes} * * * *");
    }
    if interval_minutes % 60 == 0 {
        return format!("0 0 */{} * * *", interval_minutes / 60);
    }
    "0 */30 * * * *".to_string()
}

/// Builds and starts the scheduler with the recurring scout job.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler<S, D, C, P>(
    pipeline: Arc<ScoutPipeline<S, D, C, P>>,
    interval_minutes: u64,
) -> Result<JobScheduler, JobSchedulerError>
where
    S: CampaignSource + 'static,
    D: Discovery + 'static,
    C: SeenStore + 'static,
    P: CandidateSink + 'static,
{
    let scheduler = JobScheduler::new().await?;
    let cron = cron_expression(interval_minutes);

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);
        Box::pin(async move {
            let _ = pipeline.run().await;
            tracing::info!(
                next_in_minutes = interval_minutes,
                "scheduler: waiting for next execution"
            );
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(cron = %cron, interval_minutes, "scheduler: scout job registered");
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_hour_intervals_use_minute_steps() {
        assert_eq!(cron_expression(1), "0 */1 * * * *");
        assert_eq!(cron_expression(15), "0 */15 * * * *");
        assert_eq!(cron_expression(59), "0 */59 * * * *");
    }

    #[test]
    fn whole_hour_intervals_use_hour_steps() {
        assert_eq!(cron_expression(60), "0 0 */1 * * *");
        assert_eq!(cron_expression(180), "0 0 */3 * * *");
    }

    #[test]
    fn awkward_intervals_fall_back_to_half_hourly() {
        assert_eq!(cron_expression(90), "0 */30 * * * *");
        assert_eq!(cron_expression(61), "0 */30 * * * *");
    }
}
