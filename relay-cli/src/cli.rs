use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_core::{BrokerConnector, Config, OpenMeteoSource, publisher, run_worker};
use std::{path::PathBuf, time::Duration};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-relay",
    version,
    about = "Relay weather readings from RabbitMQ to the weather API"
)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `work` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consume the queue and forward every reading to the API.
    Work,

    /// Poll open-meteo and publish readings to the queue.
    Publish {
        /// Publish a single reading and exit.
        #[arg(long)]
        once: bool,
    },

    /// Print the effective configuration.
    ShowConfig,

    /// Write the default configuration file.
    InitConfig,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.as_ref().unwrap_or(&Command::Work) {
            Command::Work => {
                let config = self.load_config()?;
                let stats = run_worker(&config).await?;
                info!(
                    received = stats.received,
                    forwarded = stats.forwarded,
                    forward_failed = stats.forward_failed,
                    dropped = stats.dropped,
                    "worker finished"
                );
            }
            Command::Publish { once } => {
                let config = self.load_config()?;
                let source = OpenMeteoSource::new(&config.source);
                let broker = BrokerConnector::connect(&config.broker).await?;
                let interval = Duration::from_secs(config.source.interval_secs);

                let stats =
                    publisher::run(&source, &broker, interval, once.then_some(1)).await;
                info!(published = stats.published, "publisher finished");
                broker.close().await;
            }
            Command::ShowConfig => {
                let config = self.load_config()?;
                print!("{}", config.to_toml()?);
            }
            Command::InitConfig => {
                let path = match &self.config {
                    Some(path) => {
                        Config::default().save_to(path)?;
                        path.clone()
                    }
                    None => Config::default().save()?,
                };
                println!("Wrote default configuration to {}", path.display());
            }
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        config.apply_env_overrides().context("Failed to apply environment overrides")?;
        Ok(config)
    }
}
