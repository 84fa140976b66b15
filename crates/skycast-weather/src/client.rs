//! Open-Meteo-compatible hourly forecast client.

use std::time::Duration;

use tracing::instrument;

use crate::types::{ForecastSnapshot, WeatherError};

const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    /// Client against the production endpoint with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        Self::with_base_url(FORECAST_API_BASE, timeout)
    }

    /// Client against an alternate endpoint, for configuration and tests.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw hourly forecast for a coordinate pair.
    ///
    /// The payload is returned as received; aggregation happens downstream.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSnapshot, WeatherError> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.to_string()))
    }
}
