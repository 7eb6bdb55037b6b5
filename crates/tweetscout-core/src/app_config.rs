//! Process-wide configuration.

/// Runtime configuration for the scout service, sourced from environment
/// variables at startup. See [`crate::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub campaign_service_url: String,
    pub amqp_url: String,
    pub redis_url: String,
    pub discovery_base_url: String,
    pub discovery_username: String,
    pub discovery_password: String,
    pub discovery_email: Option<String>,
    pub discovery_proxy_url: Option<String>,
    pub interval_minutes: u64,
    pub max_tweets_per_campaign: usize,
    pub recency_window_minutes: i64,
    pub min_followers: u64,
    pub run_on_startup: bool,
    pub inter_campaign_delay_ms: u64,
    pub lookup_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("campaign_service_url", &self.campaign_service_url)
            .field("amqp_url", &"[redacted]")
            .field("redis_url", &"[redacted]")
            .field("discovery_base_url", &self.discovery_base_url)
            .field("discovery_username", &self.discovery_username)
            .field("discovery_password", &"[redacted]")
            .field(
                "discovery_email",
                &self.discovery_email.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "discovery_proxy_url",
                &self.discovery_proxy_url.as_ref().map(|_| "[redacted]"),
            )
            .field("interval_minutes", &self.interval_minutes)
            .field("max_tweets_per_campaign", &self.max_tweets_per_campaign)
            .field("recency_window_minutes", &self.recency_window_minutes)
            .field("min_followers", &self.min_followers)
            .field("run_on_startup", &self.run_on_startup)
            .field("inter_campaign_delay_ms", &self.inter_campaign_delay_ms)
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
