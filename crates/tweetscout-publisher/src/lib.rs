//! Broker publisher: delivers candidate batches to the primary queue with a
//! dead-letter fallback on publish failure.

mod broker;
mod envelope;
mod error;
mod publisher;
mod rabbit;

pub use broker::Broker;
pub use envelope::{DeadLetterRecord, Envelope, DEAD_LETTER_QUEUE, NEW_TWEETS_QUEUE};
pub use error::PublishError;
pub use publisher::TweetPublisher;
pub use rabbit::RabbitBroker;
