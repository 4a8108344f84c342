//! Publish/subscribe.
//!
//! Channels are server-wide, so these operations take no database.

use crate::cache::RedisCache;
use futures::StreamExt;
use redis::AsyncCommands;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vesta_core::VestaResult;

/// Buffered messages per subscription before the forwarder waits.
const SUBSCRIPTION_BUFFER: usize = 256;

/// A message received on a subscribed channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubSubMessage {
    pub channel: String,
    pub payload: String,
}

/// An active subscription.
///
/// Messages are forwarded by a background task; dropping the subscription
/// stops the task and closes the server connection.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<PubSubMessage>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Waits for the next message. Returns `None` once the connection closes.
    pub async fn next_message(&mut self) -> Option<PubSubMessage> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl RedisCache {
    /// Publishes `message`, returning how many subscribers received it.
    pub async fn publish(&self, channel: &str, message: &str) -> VestaResult<i64> {
        let mut conn = self.raw_connection().await?;
        let receivers: i64 = conn.publish(channel, message).await?;
        debug!(channel = %channel, receivers, "Published message");
        Ok(receivers)
    }

    /// Subscribes to `channels`.
    ///
    /// The subscription is active on the server when this returns.
    pub async fn subscribe(&self, channels: &[&str]) -> VestaResult<Subscription> {
        let mut pubsub = self.client().get_async_pubsub().await?;
        for channel in channels {
            pubsub.subscribe(*channel).await?;
        }
        info!(?channels, "Subscribed to channels");

        let (tx, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let task = tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!("Dropping undecodable pub/sub payload: {}", e);
                        continue;
                    }
                };
                let message = PubSubMessage {
                    channel: msg.get_channel_name().to_string(),
                    payload,
                };
                if tx.send(message).await.is_err() {
                    break;
                }
            }
            debug!("Subscription stream ended");
        });

        Ok(Subscription { receiver, task })
    }
}
