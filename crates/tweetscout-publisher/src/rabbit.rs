//! RabbitMQ implementation of the [`Broker`] port.

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};

use crate::broker::Broker;
use crate::envelope::{Envelope, DEAD_LETTER_QUEUE, NEW_TWEETS_QUEUE};
use crate::error::PublishError;

/// Long-lived broker connection, shared across runs.
///
/// Both queues are declared durable at connect time so the scout can start
/// before any consumer. Individual publishes are atomic per message; the
/// all-or-nothing batch contract is enforced by aborting the batch on the
/// first failed publish.
pub struct RabbitBroker {
    connection: Connection,
    channel: Channel,
}

impl RabbitBroker {
    /// Connects and declares the `new_tweets` and `dead_letter` queues.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Connection`] if the connection, channel, or
    /// either queue declaration fails.
    pub async fn connect(amqp_url: &str) -> Result<Self, PublishError> {
        let connection = Connection::connect(amqp_url, ConnectionProperties::default())
            .await
            .map_err(|e| PublishError::Connection(format!("failed to connect to broker: {e}")))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| PublishError::Connection(format!("failed to create channel: {e}")))?;

        for queue in [NEW_TWEETS_QUEUE, DEAD_LETTER_QUEUE] {
            channel
                .queue_declare(
                    queue,
                    QueueDeclareOptions {
                        durable: true,
                        ..QueueDeclareOptions::default()
                    },
                    FieldTable::default(),
                )
                .await
                .map_err(|e| {
                    PublishError::Connection(format!("failed to declare queue {queue}: {e}"))
                })?;
        }

        tracing::info!(
            queues = ?[NEW_TWEETS_QUEUE, DEAD_LETTER_QUEUE],
            "broker connected and queues declared"
        );

        Ok(Self {
            connection,
            channel,
        })
    }
}

#[async_trait]
impl Broker for RabbitBroker {
    async fn send_batch(&self, queue: &str, envelopes: &[Envelope]) -> Result<(), PublishError> {
        for envelope in envelopes {
            #[allow(clippy::cast_sign_loss)]
            let timestamp_secs = (envelope.timestamp_ms.max(0) / 1000) as u64;
            let properties = BasicProperties::default()
                .with_message_id(envelope.key.clone().into())
                .with_timestamp(timestamp_secs)
                .with_content_type("application/json".into());

            self.channel
                .basic_publish(
                    "",
                    queue,
                    BasicPublishOptions::default(),
                    &envelope.payload,
                    properties,
                )
                .await
                .map_err(|e| {
                    PublishError::Connection(format!("failed to publish to {queue}: {e}"))
                })?;
        }

        tracing::debug!(queue, count = envelopes.len(), "batch published");
        Ok(())
    }

    async fn close(&self) -> Result<(), PublishError> {
        self.channel
            .close(200, "shutting down")
            .await
            .map_err(|e| PublishError::Connection(format!("failed to close channel: {e}")))?;
        self.connection
            .close(200, "shutting down")
            .await
            .map_err(|e| PublishError::Connection(format!("failed to close connection: {e}")))?;
        tracing::info!("broker connection closed");
        Ok(())
    }
}
