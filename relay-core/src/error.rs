use thiserror::Error;

/// Errors raised while talking to the broker or forwarding payloads.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to connect to RabbitMQ: {0}")]
    Connect(#[source] lapin::Error),

    #[error("Failed to open a channel: {0}")]
    Channel(#[source] lapin::Error),

    #[error("Failed to declare queue '{queue}': {source}")]
    Declare {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Failed to register a consumer on '{queue}': {source}")]
    Consume {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Failed to publish to '{queue}': {source}")]
    Publish {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("Failed to acknowledge delivery: {0}")]
    Ack(#[source] lapin::Error),

    #[error("Failed to decode message body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to send payload to {endpoint}: {source}")]
    Forward {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
