//! Client for `GET /api/campaigns` on the campaign-service.

use std::time::Duration;

use reqwest::{Client, Url};

use tweetscout_core::Campaign;

use crate::error::CampaignClientError;

/// Client for the campaign-service REST API.
///
/// Use [`CampaignClient::new`] for production or
/// [`CampaignClient::with_base_url`] to point at a mock server in tests.
pub struct CampaignClient {
    client: Client,
    base_url: Url,
}

impl CampaignClient {
    /// Creates a new client for the given campaign-service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CampaignClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed, or
    /// [`CampaignClientError::InvalidBaseUrl`] if `base_url` is not a valid
    /// URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CampaignClientError> {
        Self::with_base_url(base_url, timeout_secs)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`CampaignClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, CampaignClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetscout/0.1 (campaign-scout)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| CampaignClientError::InvalidBaseUrl {
                base_url: normalised.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the campaigns eligible for a scout run.
    ///
    /// Requests `GET /api/campaigns?status=ACTIVE` and re-filters the result
    /// to `ACTIVE` locally — older campaign-service deployments ignore the
    /// status parameter.
    ///
    /// # Errors
    ///
    /// - [`CampaignClientError::Http`] on network failure or non-2xx status.
    /// - [`CampaignClientError::Deserialize`] if the response body does not
    ///   match the expected shape.
    pub async fn active_campaigns(&self) -> Result<Vec<Campaign>, CampaignClientError> {
        let url = self.campaigns_url();

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let all: Vec<Campaign> =
            serde_json::from_str(&body).map_err(|e| CampaignClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let total = all.len();
        let campaigns: Vec<Campaign> = all.into_iter().filter(Campaign::is_active).collect();
        tracing::info!(
            active = campaigns.len(),
            total,
            "retrieved active campaigns"
        );

        Ok(campaigns)
    }

    fn campaigns_url(&self) -> Url {
        let mut url = self
            .base_url
            .join("api/campaigns")
            .expect("static path segment is always valid");
        url.query_pairs_mut().append_pair("status", "ACTIVE");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaigns_url_includes_status_filter() {
        let client = CampaignClient::with_base_url("http://localhost:8082", 10)
            .expect("client construction should not fail");
        assert_eq!(
            client.campaigns_url().as_str(),
            "http://localhost:8082/api/campaigns?status=ACTIVE"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = CampaignClient::with_base_url("http://localhost:8082///", 10)
            .expect("client construction should not fail");
        assert_eq!(
            client.campaigns_url().as_str(),
            "http://localhost:8082/api/campaigns?status=ACTIVE"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CampaignClient::with_base_url("not a url", 10);
        assert!(matches!(
            result,
            Err(CampaignClientError::InvalidBaseUrl { .. })
        ));
    }
}
