//! Broker capability port.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::PublishError;

/// Minimal broker surface the publisher needs: batch send to a named queue
/// and an orderly close.
///
/// The send is all-or-nothing from the caller's point of view: an `Err`
/// means the batch as a whole is treated as unpublished, regardless of how
/// many messages the broker may have accepted before the failure.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn send_batch(&self, queue: &str, envelopes: &[Envelope]) -> Result<(), PublishError>;

    /// Flush and close the underlying connection. Called once at shutdown.
    async fn close(&self) -> Result<(), PublishError>;
}
