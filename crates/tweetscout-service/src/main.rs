mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tweetscout_cache::SeenCache;
use tweetscout_campaigns::CampaignClient;
use tweetscout_core::AppConfig;
use tweetscout_discovery::{DiscoveryClient, DiscoveryConfig};
use tweetscout_pipeline::{PipelineConfig, ScoutPipeline};
use tweetscout_publisher::{RabbitBroker, TweetPublisher};

/// Delay before the optional startup run, giving collaborators time to come
/// up when the whole stack starts together.
const STARTUP_RUN_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "tweetscout-service")]
#[command(about = "Campaign tweet scout: discovers, filters, and publishes tweet candidates")]
struct Cli {
    /// Run a single scout pass immediately and exit.
    #[arg(long)]
    once: bool,
}

type Pipeline =
    ScoutPipeline<CampaignClient, DiscoveryClient, SeenCache, Arc<TweetPublisher<RabbitBroker>>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Missing required configuration (credentials, collaborator URLs) is
    // fatal: the process exits non-zero before touching any collaborator.
    let config = tweetscout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("tweet scout service starting");
    tracing::info!(
        campaign_service = %config.campaign_service_url,
        discovery_gateway = %config.discovery_base_url,
        interval_minutes = config.interval_minutes,
        max_tweets_per_campaign = config.max_tweets_per_campaign,
        recency_window_minutes = config.recency_window_minutes,
        min_followers = config.min_followers,
        run_on_startup = config.run_on_startup,
        "effective configuration"
    );

    let (pipeline, publisher) = build_pipeline(&config).await?;
    let pipeline = Arc::new(pipeline);

    if cli.once {
        tracing::info!("--once: running a single scout pass");
        let _ = pipeline.run().await;
        publisher.close().await;
        return Ok(());
    }

    let mut scheduler =
        scheduler::build_scheduler(Arc::clone(&pipeline), config.interval_minutes).await?;

    if config.run_on_startup {
        let startup_pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move {
            tokio::time::sleep(STARTUP_RUN_DELAY).await;
            tracing::info!("running initial scout on startup");
            let _ = startup_pipeline.run().await;
        });
    }

    tracing::info!("scheduler active; waiting for next execution");
    shutdown_signal().await;
    tracing::info!("received shutdown signal, starting graceful shutdown");

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!(error = %e, "scheduler shutdown failed");
    }

    // Let an in-flight run finish its network calls before closing the
    // broker connection underneath it.
    while !pipeline.is_idle() {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    publisher.close().await;

    Ok(())
}

/// Constructs the collaborators and wires them into the pipeline.
///
/// Returns the pipeline plus a second handle on the publisher so shutdown
/// can close the broker connection.
async fn build_pipeline(
    config: &AppConfig,
) -> anyhow::Result<(Pipeline, Arc<TweetPublisher<RabbitBroker>>)> {
    let campaigns = CampaignClient::new(&config.campaign_service_url, config.request_timeout_secs)?;
    let discovery = DiscoveryClient::new(DiscoveryConfig::from_app_config(config))?;
    let seen = SeenCache::new(&config.redis_url)?;

    let broker = RabbitBroker::connect(&config.amqp_url)
        .await
        .map_err(|e| anyhow::anyhow!("broker unavailable at startup: {e}"))?;
    let publisher = Arc::new(TweetPublisher::new(broker));

    let pipeline = ScoutPipeline::new(
        campaigns,
        discovery,
        seen,
        Arc::clone(&publisher),
        PipelineConfig::from_app_config(config),
    );

    Ok((pipeline, publisher))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
