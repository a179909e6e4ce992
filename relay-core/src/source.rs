use anyhow::{Context, Result, anyhow};
use reqwest::Client;

use crate::config::SourceConfig;

/// Current-conditions variables requested from open-meteo; exactly what the worker relays.
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    base_url: String,
    latitude: f64,
    longitude: f64,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            http: Client::new(),
        }
    }

    /// Fetch the forecast response as-is; it is published without reshaping.
    pub async fn fetch_current(&self) -> Result<serde_json::Value> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to open-meteo")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read open-meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "open-meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse open-meteo JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
