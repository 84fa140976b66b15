//! Forecast pipeline for Skycast
//!
//! Resolves coordinates or place names, fetches hourly forecasts from an
//! Open-Meteo-compatible API, falls back to a cached snapshot when offline,
//! and aggregates the hourly series into daily views.

pub mod aggregate;
pub mod cache;
pub mod client;
pub mod connectivity;
pub mod geocode;
pub mod service;
pub mod types;

pub use aggregate::aggregate;
pub use cache::ForecastCache;
pub use client::ForecastClient;
pub use connectivity::{ConnectivityProbe, StaticProbe, SystemProbe};
pub use geocode::GeocodeClient;
pub use service::ForecastService;
pub use types::*;
