//! Campaign domain types.
//!
//! Campaigns are owned by the campaign-service collaborator; this core only
//! reads them. The JSON shape is camelCase with a free-form `config` object
//! that may override search knobs per channel.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Lifecycle state of a campaign. Only [`CampaignStatus::Active`] campaigns
/// are eligible for a scout run; the scout never transitions state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
    /// Statuses this service does not know about are never processed.
    #[serde(other)]
    Unknown,
}

/// Search result ordering requested from the discovery capability.
///
/// The wire protocol uses the numeric values of the upstream scraper
/// (0 = top, 1 = latest, 2 = photos, 3 = videos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    Top,
    #[default]
    Latest,
    Photos,
    Videos,
}

impl SearchMode {
    /// Numeric value expected by the discovery search endpoint.
    #[must_use]
    pub fn wire_value(self) -> u8 {
        match self {
            SearchMode::Top => 0,
            SearchMode::Latest => 1,
            SearchMode::Photos => 2,
            SearchMode::Videos => 3,
        }
    }

    /// Resolve a mode from its string or numeric representation.
    ///
    /// Unknown or absent values fall back to [`SearchMode::Latest`], matching
    /// the behaviour of the upstream configuration surface.
    #[must_use]
    pub fn resolve(raw: Option<&serde_json::Value>) -> Self {
        match raw {
            Some(serde_json::Value::String(s)) => Self::from_name(s),
            Some(serde_json::Value::Number(n)) => match n.as_u64() {
                Some(0) => SearchMode::Top,
                Some(1) => SearchMode::Latest,
                Some(2) => SearchMode::Photos,
                Some(3) => SearchMode::Videos,
                _ => SearchMode::Latest,
            },
            _ => SearchMode::Latest,
        }
    }

    fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "TOP" => SearchMode::Top,
            "PHOTOS" => SearchMode::Photos,
            "VIDEOS" => SearchMode::Videos,
            _ => SearchMode::Latest,
        }
    }
}

/// A marketing campaign as served by the campaign-service collaborator.
///
/// `config` is a free-form channel configuration object; recognised keys
/// (`minFollowers`, `recencyWindowMinutes`, `maxTweetsPerScan`, `searchMode`)
/// take precedence over the campaign-level fields in the `effective_*`
/// accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub search_mode: Option<String>,
    #[serde(default)]
    pub recency_window_minutes: Option<i64>,
    #[serde(default)]
    pub min_followers: Option<u64>,
    #[serde(default)]
    pub max_tweets_per_scan: Option<usize>,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

impl Campaign {
    /// Search mode for this campaign: channel config → campaign field →
    /// [`SearchMode::Latest`].
    #[must_use]
    pub fn effective_search_mode(&self) -> SearchMode {
        if let Some(v) = self.config.get("searchMode") {
            return SearchMode::resolve(Some(v));
        }
        match &self.search_mode {
            Some(s) => SearchMode::resolve(Some(&serde_json::Value::String(s.clone()))),
            None => SearchMode::Latest,
        }
    }

    /// Minimum author follower count: channel config → campaign field →
    /// `global_default`.
    #[must_use]
    pub fn effective_min_followers(&self, global_default: u64) -> u64 {
        self.config
            .get("minFollowers")
            .and_then(serde_json::Value::as_u64)
            .or(self.min_followers)
            .unwrap_or(global_default)
    }

    /// Recency window in minutes: channel config → campaign field →
    /// `global_default`. Non-positive overrides are ignored.
    #[must_use]
    pub fn effective_recency_window_minutes(&self, global_default: i64) -> i64 {
        self.config
            .get("recencyWindowMinutes")
            .and_then(serde_json::Value::as_i64)
            .or(self.recency_window_minutes)
            .filter(|m| *m > 0)
            .unwrap_or(global_default)
    }

    /// Per-scan candidate limit: channel config → campaign field →
    /// `global_default`, capped at [`defaults::MAX_TWEETS_PER_SCAN`].
    #[must_use]
    pub fn effective_scan_limit(&self, global_default: usize) -> usize {
        let limit = self
            .config
            .get("maxTweetsPerScan")
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .or(self.max_tweets_per_scan)
            .filter(|l| *l > 0)
            .unwrap_or(global_default);
        limit.min(defaults::MAX_TWEETS_PER_SCAN)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign_json(extra: &str) -> Campaign {
        let json = format!(r#"{{"id": 7, "name": "Spring Sale", "status": "ACTIVE"{extra}}}"#);
        serde_json::from_str(&json).expect("campaign should deserialize")
    }

    #[test]
    fn deserializes_minimal_campaign_with_defaults() {
        let c = campaign_json("");
        assert_eq!(c.id, 7);
        assert!(c.hashtags.is_empty());
        assert!(c.is_active());
        assert_eq!(c.effective_search_mode(), SearchMode::Latest);
    }

    #[test]
    fn unknown_status_is_not_active() {
        let c: Campaign =
            serde_json::from_str(r#"{"id": 1, "name": "x", "status": "ARCHIVED"}"#).unwrap();
        assert_eq!(c.status, CampaignStatus::Unknown);
        assert!(!c.is_active());
    }

    #[test]
    fn search_mode_resolves_strings_and_numbers() {
        assert_eq!(
            SearchMode::resolve(Some(&serde_json::json!("top"))),
            SearchMode::Top
        );
        assert_eq!(
            SearchMode::resolve(Some(&serde_json::json!(3))),
            SearchMode::Videos
        );
        assert_eq!(
            SearchMode::resolve(Some(&serde_json::json!("bogus"))),
            SearchMode::Latest
        );
        assert_eq!(SearchMode::resolve(None), SearchMode::Latest);
    }

    #[test]
    fn channel_config_overrides_campaign_field() {
        let c = campaign_json(
            r#", "minFollowers": 500, "config": {"minFollowers": 2000, "searchMode": "PHOTOS"}"#,
        );
        assert_eq!(c.effective_min_followers(150_000), 2000);
        assert_eq!(c.effective_search_mode(), SearchMode::Photos);
    }

    #[test]
    fn campaign_field_beats_global_default() {
        let c = campaign_json(r#", "recencyWindowMinutes": 60"#);
        assert_eq!(c.effective_recency_window_minutes(180), 60);
        let plain = campaign_json("");
        assert_eq!(plain.effective_recency_window_minutes(180), 180);
    }

    #[test]
    fn scan_limit_is_capped_at_global_maximum() {
        let c = campaign_json(r#", "maxTweetsPerScan": 10000"#);
        assert_eq!(c.effective_scan_limit(10), defaults::MAX_TWEETS_PER_SCAN);
        let plain = campaign_json("");
        assert_eq!(plain.effective_scan_limit(10), 10);
    }

    #[test]
    fn zero_scan_limit_falls_back_to_default() {
        let c = campaign_json(r#", "maxTweetsPerScan": 0"#);
        assert_eq!(c.effective_scan_limit(25), 25);
    }
}
