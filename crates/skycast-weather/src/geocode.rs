//! Place-name resolution against a Nominatim-compatible search endpoint.
//! Free-form queries return zero or more coordinate candidates.

use std::time::Duration;

use serde::Deserialize;
use tracing::instrument;

use crate::types::{PlaceCandidate, WeatherError};

const GEOCODE_API_BASE: &str = "https://geocode.maps.co";

// Wire shape of one search result. Coordinates arrive as JSON strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Client against the production endpoint with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        Self::with_base_url(GEOCODE_API_BASE, timeout)
    }

    /// Client against an alternate endpoint, for configuration and tests.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search for coordinate candidates matching a free-form place name.
    ///
    /// An empty result set is `Ok`; candidates whose coordinates do not parse
    /// are skipped.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, WeatherError> {
        let url = format!("{}/search", self.base_url);

        let response = self.client.get(&url).query(&[("q", query)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| WeatherError::Decode(e.to_string()))?;

        let candidates: Vec<PlaceCandidate> = results
            .into_iter()
            .filter_map(|result| {
                let latitude = result.lat.parse().ok()?;
                let longitude = result.lon.parse().ok()?;
                Some(PlaceCandidate {
                    latitude,
                    longitude,
                    display_name: result.display_name,
                })
            })
            .collect();

        tracing::debug!(count = candidates.len(), "Geocode search complete");
        Ok(candidates)
    }
}
