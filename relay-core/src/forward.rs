use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use std::{fmt::Debug, time::Duration};

use crate::{config::ForwardConfig, error::RelayError, model::WeatherPayload};

#[async_trait]
pub trait Forwarder: Send + Sync + Debug {
    /// Send one payload. Any HTTP status counts as delivered; only transport failures are errors.
    async fn forward(&self, payload: &WeatherPayload) -> Result<StatusCode, RelayError>;
}

#[derive(Debug, Clone)]
pub struct HttpForwarder {
    endpoint: String,
    http: Client,
}

impl HttpForwarder {
    pub fn new(config: &ForwardConfig) -> Result<Self, RelayError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(RelayError::HttpClient)?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, payload: &WeatherPayload) -> Result<StatusCode, RelayError> {
        let res = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_json())
            .send()
            .await
            .map_err(|source| RelayError::Forward {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        Ok(res.status())
    }
}
