use thiserror::Error;

/// Errors returned by the campaign-service client.
#[derive(Debug, Error)]
pub enum CampaignClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid campaign-service base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
