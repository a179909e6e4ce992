use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RelayError;

/// Message body published to the queue: the open-meteo `current` block.
///
/// Only the three relayed fields are read; anything else in the body is ignored.
/// Missing or `null` values decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InboundReading {
    #[serde(deserialize_with = "null_as_default")]
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(deserialize_with = "null_as_default")]
    pub temperature_2m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub relative_humidity_2m: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed_10m: f64,
}

impl InboundReading {
    /// Decode a delivery body. A bare `null` body is an empty reading.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        let reading: Option<Self> = serde_json::from_slice(body)?;
        Ok(reading.unwrap_or_default())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body POSTed to the weather API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
}

impl WeatherPayload {
    pub fn to_json(&self) -> Vec<u8> {
        // Plain f64 fields; serde_json writes non-finite values as null instead of failing.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

impl From<&InboundReading> for WeatherPayload {
    fn from(reading: &InboundReading) -> Self {
        Self {
            temperature: reading.current.temperature_2m,
            humidity: reading.current.relative_humidity_2m,
            wind_speed: reading.current.wind_speed_10m,
        }
    }
}
