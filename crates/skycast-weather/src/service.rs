//! Forecast acquisition and publication.
//!
//! `ForecastService` orchestrates the pipeline: resolve input, probe
//! connectivity, fetch or fall back to the cached snapshot, aggregate, and
//! publish the derived view on a watch channel.

use std::time::Duration;

use chrono::Local;
use parking_lot::Mutex;
use skycast_core::Config;
use tokio::sync::watch;
use tracing::instrument;

use crate::aggregate::aggregate;
use crate::cache::ForecastCache;
use crate::client::ForecastClient;
use crate::connectivity::{ConnectivityProbe, SystemProbe};
use crate::geocode::GeocodeClient;
use crate::types::{ForecastSnapshot, ForecastView, WeatherError};

pub struct ForecastService {
    client: ForecastClient,
    geocode: GeocodeClient,
    cache: Mutex<ForecastCache>,
    probe: Box<dyn ConnectivityProbe>,
    view_tx: watch::Sender<ForecastView>,
}

impl ForecastService {
    /// Service wired from configuration, probing the system network state.
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let timeout = Duration::from_secs(config.weather.request_timeout_secs);
        Ok(Self::with_parts(
            ForecastClient::with_base_url(&config.weather.forecast_url, timeout)?,
            GeocodeClient::with_base_url(&config.weather.geocode_url, timeout)?,
            ForecastCache::new(&config.data_dir),
            SystemProbe,
        ))
    }

    /// Service assembled from explicit collaborators.
    pub fn with_parts(
        client: ForecastClient,
        geocode: GeocodeClient,
        cache: ForecastCache,
        probe: impl ConnectivityProbe + 'static,
    ) -> Self {
        let (view_tx, _) = watch::channel(ForecastView::default());
        Self {
            client,
            geocode,
            cache: Mutex::new(cache),
            probe: Box::new(probe),
            view_tx,
        }
    }

    /// Refresh the forecast for a coordinate pair.
    ///
    /// Never fails: connectivity and fetch trouble fall back to the cached
    /// snapshot, and invalid input degrades to an empty view. The outcome is
    /// published on the watch channel and also returned.
    #[instrument(skip(self), level = "info")]
    pub async fn refresh_by_coordinates(&self, latitude: f64, longitude: f64) -> ForecastView {
        if let Err(e) = validate_coordinates(latitude, longitude) {
            tracing::warn!("Rejected refresh: {}", e);
            return self.publish(ForecastView::default());
        }

        if !self.probe.is_available() {
            tracing::info!("Network unavailable, falling back to cached forecast");
            return self.publish_cached();
        }

        match self.client.fetch(latitude, longitude).await {
            Ok(snapshot) => {
                if let Err(e) = self.cache.lock().put(&snapshot) {
                    tracing::warn!("Failed to persist forecast snapshot: {}", e);
                }
                self.publish(view_from_snapshot(&snapshot, false))
            }
            Err(e) => {
                tracing::warn!("Forecast fetch failed, falling back to cache: {}", e);
                self.publish_cached()
            }
        }
    }

    /// Resolve a place name and refresh the forecast for its first candidate.
    ///
    /// Zero candidates or a resolution failure publish an empty view without
    /// touching the cache; no coordinates were established to fall back on.
    #[instrument(skip(self), level = "info")]
    pub async fn refresh_by_place(&self, name: &str) -> ForecastView {
        let candidates = match self.geocode.search(name).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Place resolution failed: {}", e);
                return self.publish(ForecastView::default());
            }
        };

        let Some(candidate) = candidates.first() else {
            tracing::info!("No candidates for place '{}'", name);
            return self.publish(ForecastView::default());
        };

        if let Some(display_name) = &candidate.display_name {
            tracing::info!("Resolved '{}' to {}", name, display_name);
        }
        self.refresh_by_coordinates(candidate.latitude, candidate.longitude)
            .await
    }

    /// Receiver for the published view; observers always see the latest value.
    pub fn subscribe(&self) -> watch::Receiver<ForecastView> {
        self.view_tx.subscribe()
    }

    /// Latest published view.
    pub fn current_view(&self) -> ForecastView {
        self.view_tx.borrow().clone()
    }

    /// Connectivity passthrough, usable independently of a refresh.
    pub fn is_online(&self) -> bool {
        self.probe.is_available()
    }

    fn publish_cached(&self) -> ForecastView {
        match self.cache.lock().get() {
            Some(snapshot) => self.publish(view_from_snapshot(&snapshot, true)),
            None => {
                tracing::info!("No cached forecast, publishing empty view");
                self.publish(ForecastView {
                    is_offline: true,
                    ..ForecastView::default()
                })
            }
        }
    }

    fn publish(&self, view: ForecastView) -> ForecastView {
        self.view_tx.send_replace(view.clone());
        view
    }
}

fn view_from_snapshot(snapshot: &ForecastSnapshot, is_offline: bool) -> ForecastView {
    let (upcoming_today, daily_summaries) = aggregate(snapshot, Local::now().naive_local());
    ForecastView {
        upcoming_today,
        daily_summaries,
        is_offline,
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);

    if valid {
        Ok(())
    } else {
        Err(WeatherError::InvalidCoordinates {
            lat: latitude,
            lon: longitude,
        })
    }
}
