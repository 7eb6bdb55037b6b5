//! HTTP client for the content-discovery gateway.
//!
//! Wraps `reqwest` with session management, bounded cursor-paginated search,
//! and per-author influence lookup. All data calls carry the bearer token
//! from the cached session; a 401 invalidates that session so the next run
//! re-authenticates.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tokio::sync::Mutex;

use tweetscout_core::{AppConfig, SearchMode};

use crate::error::DiscoveryError;
use crate::retry::retry_with_backoff;
use crate::session::Session;
use crate::transport::{build_transport, TransportKind};
use crate::types::{AuthorInfluence, LoginResponse, RawTweet, SearchPage};

/// Search page size requested from the gateway. The effective `count`
/// parameter is the remaining budget capped at this value.
const PAGE_SIZE: usize = 20;

/// Construction parameters for [`DiscoveryClient`].
#[derive(Clone)]
pub struct DiscoveryConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub proxy_url: Option<String>,
    pub request_timeout_secs: u64,
    pub lookup_timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl std::fmt::Debug for DiscoveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("email", &self.email.as_ref().map(|_| "[redacted]"))
            .field("proxy_url", &self.proxy_url.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish()
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.discovery_base_url.clone(),
            username: config.discovery_username.clone(),
            password: config.discovery_password.clone(),
            email: config.discovery_email.clone(),
            proxy_url: config.discovery_proxy_url.clone(),
            request_timeout_secs: config.request_timeout_secs,
            lookup_timeout_secs: config.lookup_timeout_secs,
            max_retries: 3,
            backoff_base_ms: 1_000,
        }
    }
}

/// Client for the content-discovery gateway.
///
/// The authenticated session is created lazily on the first data call,
/// reused across campaigns within a run, and invalidated on authentication
/// failure. Transport (standard vs enhanced) is fixed at construction.
pub struct DiscoveryClient {
    client: Client,
    kind: TransportKind,
    base_url: Url,
    config: DiscoveryConfig,
    session: Mutex<Option<Session>>,
}

impl DiscoveryClient {
    /// Creates a new client for the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DiscoveryError::InvalidBaseUrl`] if the
    /// base URL does not parse.
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let (client, kind) =
            build_transport(config.proxy_url.as_deref(), config.request_timeout_secs)?;

        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DiscoveryError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(transport = %kind, "discovery client constructed");

        Ok(Self {
            client,
            kind,
            base_url,
            config,
            session: Mutex::new(None),
        })
    }

    /// Which transport variant this client was built with.
    #[must_use]
    pub fn transport_kind(&self) -> TransportKind {
        self.kind
    }

    /// Returns the bearer token of the cached session, logging in first if
    /// no live session exists.
    ///
    /// Idempotent: concurrent callers serialize on the session lock and at
    /// most one login request is sent. A session invalidated by a prior
    /// failure is re-established here.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Auth`] if the gateway rejects the
    /// credentials, or [`DiscoveryError::Http`] on network failure.
    pub async fn authenticate(&self) -> Result<String, DiscoveryError> {
        let mut session = self.session.lock().await;
        if let Some(existing) = session.as_ref() {
            return Ok(existing.token.clone());
        }

        let url = self.endpoint(&["api", "login"]);
        let mut body = serde_json::json!({
            "username": self.config.username,
            "password": self.config.password,
        });
        if let Some(email) = &self.config.email {
            body["email"] = serde_json::Value::String(email.clone());
        }

        let response = self.client.post(url.clone()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Auth(format!(
                "login rejected with status {status}: {detail}"
            )));
        }

        let text = response.text().await?;
        let login: LoginResponse =
            serde_json::from_str(&text).map_err(|e| DiscoveryError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let fresh = Session::new(login.token.clone());
        tracing::info!(acquired_at = %fresh.acquired_at, "discovery session established");
        *session = Some(fresh);
        Ok(login.token)
    }

    /// Drops the cached session so the next call re-authenticates.
    pub async fn invalidate_session(&self) {
        let mut session = self.session.lock().await;
        if session.take().is_some() {
            tracing::warn!("discovery session invalidated");
        }
    }

    /// Searches the gateway for tweets matching `query`.
    ///
    /// Pages through results until `limit` tweets are collected or the
    /// cursor runs out; the sequence is finite and not restartable.
    /// Individual tweets that fail to parse are skipped with a warning.
    /// Transient page-fetch errors are retried with back-off.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Auth`] if the session is rejected; the cached
    ///   session is invalidated before returning.
    /// - [`DiscoveryError::Http`] on persistent network failure.
    /// - [`DiscoveryError::Deserialize`] if a page body is not valid JSON.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        mode: SearchMode,
    ) -> Result<Vec<RawTweet>, DiscoveryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let token = self.authenticate().await?;
        let mut results: Vec<RawTweet> = Vec::new();
        let mut cursor: Option<String> = None;

        while results.len() < limit {
            let count = (limit - results.len()).min(PAGE_SIZE);
            let mut url = self.endpoint(&["api", "search"]);
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("q", query);
                pairs.append_pair("mode", &mode.wire_value().to_string());
                pairs.append_pair("count", &count.to_string());
                if let Some(c) = &cursor {
                    pairs.append_pair("cursor", c);
                }
            }

            let page = retry_with_backoff(
                self.config.max_retries,
                self.config.backoff_base_ms,
                || self.fetch_search_page(url.clone(), &token),
            )
            .await?;

            let page_len = page.tweets.len();
            for value in page.tweets {
                match serde_json::from_value::<RawTweet>(value) {
                    Ok(tweet) => {
                        results.push(tweet);
                        if results.len() >= limit {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed tweet in search page");
                    }
                }
            }

            match page.next_cursor {
                Some(next) if page_len > 0 => cursor = Some(next),
                _ => break,
            }
        }

        Ok(results)
    }

    /// Looks up the influence (follower count, verification) of an author.
    ///
    /// The lookup is raced against the configured timeout; a timeout or
    /// error here is isolated to the single candidate being considered.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::LookupTimeout`] if the gateway does not answer in
    ///   time.
    /// - [`DiscoveryError::Auth`] if the session is rejected; the cached
    ///   session is invalidated before returning.
    /// - [`DiscoveryError::Http`] / [`DiscoveryError::Deserialize`] on
    ///   network or shape failure.
    pub async fn author_influence(&self, handle: &str) -> Result<AuthorInfluence, DiscoveryError> {
        let token = self.authenticate().await?;
        let url = self.endpoint(&["api", "profile", handle]);

        let fetch = async {
            let body = self.request_json(url.clone(), &token).await?;
            serde_json::from_value::<AuthorInfluence>(body).map_err(|e| {
                DiscoveryError::Deserialize {
                    context: url.to_string(),
                    source: e,
                }
            })
        };

        match tokio::time::timeout(
            Duration::from_secs(self.config.lookup_timeout_secs),
            fetch,
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(DiscoveryError::LookupTimeout {
                handle: handle.to_string(),
                timeout_secs: self.config.lookup_timeout_secs,
            }),
        }
    }

    async fn fetch_search_page(
        &self,
        url: Url,
        token: &str,
    ) -> Result<SearchPage, DiscoveryError> {
        let body = self.request_json(url.clone(), token).await?;
        serde_json::from_value(body).map_err(|e| DiscoveryError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends an authenticated GET, mapping 401 to [`DiscoveryError::Auth`]
    /// (invalidating the cached session) and parsing the body as JSON.
    async fn request_json(
        &self,
        url: Url,
        token: &str,
    ) -> Result<serde_json::Value, DiscoveryError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_session().await;
            return Err(DiscoveryError::Auth(format!(
                "gateway rejected session for {url}"
            )));
        }

        let response = response.error_for_status()?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| DiscoveryError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL always has a path")
            .pop_if_empty()
            .extend(segments);
        url
    }
}
