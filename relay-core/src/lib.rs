//! Core library for the weather relay worker.
//!
//! This crate defines:
//! - Configuration (file + environment overrides)
//! - The broker connector and the relay loop that drains the queue
//! - HTTP forwarding of mapped payloads
//! - The open-meteo publisher that fills the queue
//!
//! It is used by `relay-cli`, but the relay loop is generic over its delivery
//! stream and forwarder so it can be driven by other transports too.

pub mod broker;
pub mod config;
pub mod error;
pub mod forward;
pub mod model;
pub mod publisher;
pub mod relay;
pub mod source;

pub use broker::{Acknowledge, BrokerConnector, ReadingSink};
pub use config::{BrokerConfig, Config, ForwardConfig, SourceConfig};
pub use error::RelayError;
pub use forward::{Forwarder, HttpForwarder};
pub use model::{CurrentConditions, InboundReading, WeatherPayload};
pub use relay::{Disposition, Outcome, Relay, RelayStats, run_worker};
pub use source::OpenMeteoSource;
