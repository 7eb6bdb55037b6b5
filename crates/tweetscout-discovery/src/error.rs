use thiserror::Error;

/// Errors returned by the discovery gateway client.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication against the gateway failed, or a data call was
    /// rejected with 401. The cached session has been invalidated.
    #[error("discovery authentication failed: {0}")]
    Auth(String),

    /// The gateway returned an application-level error.
    #[error("discovery API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// An influence lookup did not complete within the configured timeout.
    #[error("influence lookup for @{handle} timed out after {timeout_secs}s")]
    LookupTimeout { handle: String, timeout_secs: u64 },

    /// The configured base URL is not a valid URL.
    #[error("invalid discovery base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
