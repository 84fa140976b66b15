//! Single-slot persistent store for the most recent forecast snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{ForecastSnapshot, WeatherError};

const CACHE_FILE: &str = "forecast_cache.json";

/// Holds at most one snapshot: the latest successful fetch. A fresh fetch
/// overwrites the slot; readers get whatever was written last.
#[derive(Debug)]
pub struct ForecastCache {
    cache_path: PathBuf,
    data: Option<ForecastSnapshot>,
}

impl ForecastCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            cache_path: data_dir.join(CACHE_FILE),
            data: None,
        }
    }

    /// Overwrite the slot and persist it.
    pub fn put(&mut self, snapshot: &ForecastSnapshot) -> Result<(), WeatherError> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| WeatherError::Cache(format!("serialize snapshot: {}", e)))?;

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| WeatherError::Cache(format!("create cache dir: {}", e)))?;
        }
        fs::write(&self.cache_path, json)
            .map_err(|e| WeatherError::Cache(format!("write cache file: {}", e)))?;

        self.data = Some(snapshot.clone());
        Ok(())
    }

    /// Latest stored snapshot, if any.
    ///
    /// Serves the in-memory copy when warm, otherwise reads the file.
    /// Unreadable or corrupt files count as a miss.
    pub fn get(&mut self) -> Option<ForecastSnapshot> {
        if self.data.is_none() {
            self.data = self.read_file();
        }
        self.data.clone()
    }

    fn read_file(&self) -> Option<ForecastSnapshot> {
        let raw = match fs::read_to_string(&self.cache_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!("Cache read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Discarding corrupt cache file: {}", e);
                None
            }
        }
    }
}
