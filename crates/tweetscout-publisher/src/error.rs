use thiserror::Error;

/// Errors from the broker publishing path.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Broker connection, channel, or publish failure.
    #[error("broker error: {0}")]
    Connection(String),

    /// A candidate batch could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
