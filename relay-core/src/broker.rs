use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, Consumer,
    message::Delivery,
    options::{BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
};
use tracing::{debug, info, warn};

use crate::{config::BrokerConfig, error::RelayError};

/// One delivery handed to the relay loop.
#[async_trait]
pub trait Acknowledge: Send + Sync {
    fn body(&self) -> &[u8];

    /// Confirm the delivery so the broker removes it from the queue.
    async fn acknowledge(&self) -> Result<(), RelayError>;
}

#[async_trait]
impl Acknowledge for Delivery {
    fn body(&self) -> &[u8] {
        &self.data
    }

    async fn acknowledge(&self) -> Result<(), RelayError> {
        self.ack(BasicAckOptions::default())
            .await
            .map_err(RelayError::Ack)
    }
}

/// Destination for raw readings fetched by the publisher.
#[async_trait]
pub trait ReadingSink: Send + Sync {
    async fn publish(&self, body: &[u8]) -> Result<(), RelayError>;
}

/// Owns the broker connection and the single channel used for the queue.
pub struct BrokerConnector {
    connection: Connection,
    channel: Channel,
    queue: String,
}

impl std::fmt::Debug for BrokerConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConnector")
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl BrokerConnector {
    /// Connect, open a channel and make sure the queue exists.
    pub async fn connect(config: &BrokerConfig) -> Result<Self, RelayError> {
        let connection = Connection::connect(&config.url, ConnectionProperties::default())
            .await
            .map_err(RelayError::Connect)?;

        let channel = connection
            .create_channel()
            .await
            .map_err(RelayError::Channel)?;

        let queue = channel
            .queue_declare(&config.queue, declare_options(), FieldTable::default())
            .await
            .map_err(|source| RelayError::Declare {
                queue: config.queue.clone(),
                source,
            })?;

        info!(
            queue = %config.queue,
            messages = queue.message_count(),
            consumers = queue.consumer_count(),
            "connected to broker"
        );

        Ok(Self {
            connection,
            channel,
            queue: config.queue.clone(),
        })
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Register a manual-ack consumer with a broker-assigned tag.
    pub async fn consume(&self) -> Result<Consumer, RelayError> {
        let consumer = self
            .channel
            .basic_consume(&self.queue, "", consume_options(), FieldTable::default())
            .await
            .map_err(|source| RelayError::Consume {
                queue: self.queue.clone(),
                source,
            })?;

        debug!(queue = %self.queue, tag = ?consumer.tag(), "consumer registered");
        Ok(consumer)
    }

    /// Close the channel, then the connection. Failures are only logged.
    pub async fn close(self) {
        if let Err(err) = self.channel.close(200, "OK").await {
            warn!(error = %err, "failed to close channel");
        }
        if let Err(err) = self.connection.close(200, "OK").await {
            warn!(error = %err, "failed to close connection");
        }
    }
}

#[async_trait]
impl ReadingSink for BrokerConnector {
    /// Publish to the default exchange, routed straight to the queue.
    async fn publish(&self, body: &[u8]) -> Result<(), RelayError> {
        let publish_err = |source| RelayError::Publish {
            queue: self.queue.clone(),
            source,
        };

        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                body,
                BasicProperties::default(),
            )
            .await
            .map_err(publish_err)?
            .await
            .map_err(publish_err)?;

        Ok(())
    }
}

fn declare_options() -> QueueDeclareOptions {
    QueueDeclareOptions {
        passive: false,
        durable: false,
        exclusive: false,
        auto_delete: false,
        nowait: false,
    }
}

fn consume_options() -> BasicConsumeOptions {
    BasicConsumeOptions {
        no_local: false,
        no_ack: false,
        exclusive: false,
        nowait: false,
    }
}
