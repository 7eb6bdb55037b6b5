//! Batch publishing with the dead-letter fallback.

use tweetscout_core::Candidate;

use crate::broker::Broker;
use crate::envelope::{DeadLetterRecord, Envelope, DEAD_LETTER_QUEUE, NEW_TWEETS_QUEUE};
use crate::error::PublishError;

/// Publishes candidate batches for a campaign.
///
/// The batch is all-or-nothing: the full count is returned only when the
/// whole batch was accepted. On failure exactly one dead-letter record —
/// carrying the entire batch and the causing error — is attempted; if that
/// also fails the loss is logged and `0` is returned. Candidates from a
/// failed batch are not marked seen, so they stay eligible for the next run.
pub struct TweetPublisher<B> {
    broker: B,
}

impl<B: Broker> TweetPublisher<B> {
    pub fn new(broker: B) -> Self {
        Self { broker }
    }

    /// Sends `candidates` to the primary queue as one batch.
    ///
    /// Returns the number of candidates published: the batch size on
    /// success, `0` on failure (after the single dead-letter attempt).
    pub async fn publish(&self, campaign_id: i64, candidates: &[Candidate]) -> usize {
        if candidates.is_empty() {
            tracing::debug!(campaign_id, "no candidates to publish");
            return 0;
        }

        match self.send_candidates(candidates).await {
            Ok(()) => {
                tracing::info!(
                    campaign_id,
                    count = candidates.len(),
                    queue = NEW_TWEETS_QUEUE,
                    "published candidate batch"
                );
                candidates.len()
            }
            Err(e) => {
                tracing::error!(
                    campaign_id,
                    count = candidates.len(),
                    error = %e,
                    "candidate batch publish failed"
                );
                self.send_dead_letter(campaign_id, candidates, &e).await;
                0
            }
        }
    }

    /// Flush and close the broker connection at shutdown.
    pub async fn close(&self) {
        if let Err(e) = self.broker.close().await {
            tracing::warn!(error = %e, "broker close failed");
        }
    }

    async fn send_candidates(&self, candidates: &[Candidate]) -> Result<(), PublishError> {
        let envelopes = candidates
            .iter()
            .map(Envelope::for_candidate)
            .collect::<Result<Vec<_>, _>>()?;
        self.broker.send_batch(NEW_TWEETS_QUEUE, &envelopes).await
    }

    /// One attempt, never more: a dead-letter failure is terminal for the
    /// batch and surfaces only in the logs.
    async fn send_dead_letter(
        &self,
        campaign_id: i64,
        candidates: &[Candidate],
        cause: &PublishError,
    ) {
        let record =
            DeadLetterRecord::new(campaign_id, candidates.to_vec(), cause.to_string());

        let payload = match serde_json::to_vec(&record) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(campaign_id, error = %e, "failed to encode dead-letter record");
                return;
            }
        };

        let envelope = Envelope {
            key: format!("failed_{campaign_id}_{}", record.timestamp.timestamp_millis()),
            payload,
            timestamp_ms: record.timestamp.timestamp_millis(),
        };

        match self
            .broker
            .send_batch(DEAD_LETTER_QUEUE, std::slice::from_ref(&envelope))
            .await
        {
            Ok(()) => {
                tracing::info!(
                    campaign_id,
                    count = candidates.len(),
                    "sent failed batch to dead letter queue"
                );
            }
            Err(e) => {
                tracing::error!(campaign_id, error = %e, "failed to send to dead letter queue");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// Records every batch; optionally fails sends per queue.
    #[derive(Default)]
    struct MockBroker {
        sent: Mutex<Vec<(String, Vec<Envelope>)>>,
        fail_primary: bool,
        fail_dead_letter: bool,
    }

    #[async_trait]
    impl Broker for MockBroker {
        async fn send_batch(
            &self,
            queue: &str,
            envelopes: &[Envelope],
        ) -> Result<(), PublishError> {
            if queue == NEW_TWEETS_QUEUE && self.fail_primary {
                return Err(PublishError::Connection("primary queue down".to_string()));
            }
            if queue == DEAD_LETTER_QUEUE && self.fail_dead_letter {
                return Err(PublishError::Connection("dead letter down".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((queue.to_string(), envelopes.to_vec()));
            Ok(())
        }

        async fn close(&self) -> Result<(), PublishError> {
            Ok(())
        }
    }

    fn candidate(tweet_id: &str) -> Candidate {
        Candidate {
            tweet_id: tweet_id.to_string(),
            campaign_id: 5,
            author: format!("author_{tweet_id}"),
            text: "#deal".to_string(),
            created_at: Utc::now(),
            url: format!("https://twitter.com/a/status/{tweet_id}"),
            follower_count: 2000,
            verified: false,
            likes: 1,
            retweets: 0,
            replies: 0,
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn publishes_full_batch_keyed_by_tweet_id() {
        let publisher = TweetPublisher::new(MockBroker::default());
        let batch = [candidate("1"), candidate("2"), candidate("3")];

        let published = publisher.publish(5, &batch).await;
        assert_eq!(published, 3);

        let sent = publisher.broker.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "one batch send to the primary queue");
        let (queue, envelopes) = &sent[0];
        assert_eq!(queue, NEW_TWEETS_QUEUE);
        assert_eq!(envelopes.len(), 3);
        assert_eq!(envelopes[0].key, "1");
        assert_eq!(envelopes[2].key, "3");

        let payload: serde_json::Value = serde_json::from_slice(&envelopes[0].payload).unwrap();
        assert_eq!(payload["tweetId"], "1");
        assert_eq!(payload["campaignId"], 5);
    }

    #[tokio::test]
    async fn failed_batch_produces_exactly_one_dead_letter_record() {
        let publisher = TweetPublisher::new(MockBroker {
            fail_primary: true,
            ..MockBroker::default()
        });
        let batch = [candidate("1"), candidate("2"), candidate("3"), candidate("4")];

        let published = publisher.publish(5, &batch).await;
        assert_eq!(published, 0, "failed batch must report zero published");

        let sent = publisher.broker.sent.lock().unwrap();
        assert_eq!(sent.len(), 1, "exactly one dead-letter send");
        let (queue, envelopes) = &sent[0];
        assert_eq!(queue, DEAD_LETTER_QUEUE);
        assert_eq!(envelopes.len(), 1, "one record per failed batch, not per tweet");

        let record: serde_json::Value = serde_json::from_slice(&envelopes[0].payload).unwrap();
        assert_eq!(record["campaignId"], 5);
        assert_eq!(record["tweets"].as_array().unwrap().len(), 4);
        assert_eq!(record["service"], "tweetscout");
        assert!(
            record["error"]
                .as_str()
                .unwrap()
                .contains("primary queue down"),
            "dead-letter record must carry the causing error"
        );
    }

    #[tokio::test]
    async fn dead_letter_failure_is_swallowed() {
        let publisher = TweetPublisher::new(MockBroker {
            fail_primary: true,
            fail_dead_letter: true,
            ..MockBroker::default()
        });

        let published = publisher.publish(5, &[candidate("1")]).await;
        assert_eq!(published, 0);
        assert!(publisher.broker.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_never_touches_the_broker() {
        let publisher = TweetPublisher::new(MockBroker {
            fail_primary: true,
            ..MockBroker::default()
        });
        assert_eq!(publisher.publish(5, &[]).await, 0);
        assert!(publisher.broker.sent.lock().unwrap().is_empty());
    }
}
