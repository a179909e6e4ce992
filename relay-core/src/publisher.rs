//! Polls open-meteo and feeds the raw response into the queue the worker consumes.

use std::time::Duration;
use tracing::{error, info};

use crate::{broker::ReadingSink, source::OpenMeteoSource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishStats {
    pub published: u64,
    pub fetch_failed: u64,
    pub publish_failed: u64,
}

/// Fetch and publish every `interval`. Runs forever unless `max_iterations` is set.
///
/// A failed fetch or publish is logged and the loop moves on to the next tick.
pub async fn run<S: ReadingSink>(
    source: &OpenMeteoSource,
    sink: &S,
    interval: Duration,
    max_iterations: Option<u64>,
) -> PublishStats {
    let mut stats = PublishStats::default();
    let mut iteration = 0u64;

    loop {
        iteration += 1;

        match source.fetch_current().await {
            Ok(reading) => match sink.publish(reading.to_string().as_bytes()).await {
                Ok(()) => {
                    stats.published += 1;
                    info!("sent weather data to queue");
                }
                Err(err) => {
                    stats.publish_failed += 1;
                    error!(error = %err, "failed to publish weather data");
                }
            },
            Err(err) => {
                stats.fetch_failed += 1;
                error!(error = %format!("{err:#}"), "failed to fetch weather data");
            }
        }

        if max_iterations.is_some_and(|max| iteration >= max) {
            return stats;
        }

        tokio::time::sleep(interval).await;
    }
}
