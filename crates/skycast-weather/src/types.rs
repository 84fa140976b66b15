use serde::{Deserialize, Serialize};

/// Weather condition buckets for WMO present-weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Bucket a WMO weather code by its present-weather decade.
    ///
    /// Shower codes split across buckets: 80..=82 are rain, 83..=89 snow.
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            40..=49 => Self::Fog,
            50..=59 => Self::Drizzle,
            60..=69 | 80..=82 => Self::Rain,
            70..=79 | 83..=89 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

/// Hourly series block of a forecast payload.
///
/// The three sequences are index-aligned; the upstream API may omit or null
/// any of them, and consumers truncate to the shortest one present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBlock {
    pub time: Option<Vec<String>>,
    pub temperature_2m: Option<Vec<f64>>,
    pub weather_code: Option<Vec<i32>>,
}

/// One raw forecast payload, as fetched from the API or loaded from cache.
/// Immutable once produced; a new fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub hourly: Option<HourlyBlock>,
}

/// One aligned hour of the forecast (local time, °C, WMO code)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temperature_c: f64,
    pub weather_code: i32,
}

impl HourlyPoint {
    /// Condition bucket for this hour's weather code.
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }
}

/// Per-day aggregate over the hours beyond the today window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    /// Code of the first hour that reaches the day's maximum temperature
    pub weather_code: i32,
}

impl DailySummary {
    /// Condition bucket for the day's representative weather code.
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }
}

/// Derived forecast state published to observers.
///
/// Rebuilt in full on every fetch or cache fallback; `is_offline` is true when
/// the data came from the cache (or nothing) instead of a live fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    pub upcoming_today: Vec<HourlyPoint>,
    pub daily_summaries: Vec<DailySummary>,
    pub is_offline: bool,
}

/// A coordinate candidate returned by place-name search
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: Option<String>,
}

/// Weather pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather service returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("No matching place for '{0}'")]
    NoCandidates(String),

    #[error("No cached forecast available")]
    CacheMiss,

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Coordinates out of range: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Status(_) => "The weather service is unavailable. Try again later.".to_string(),
            Self::Decode(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
            Self::NoCandidates(name) => format!("No location found for '{}'.", name),
            Self::CacheMiss => "No saved forecast available yet.".to_string(),
            Self::Cache(_) => "Saved forecast could not be read.".to_string(),
            Self::InvalidCoordinates { .. } => {
                "Latitude and longitude must be valid coordinates.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_wmo_code_clear_and_cloud_cover() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(
            WeatherCondition::from_wmo_code(1),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(3),
            WeatherCondition::PartlyCloudy
        );
    }

    #[test]
    fn test_wmo_code_fog_decade() {
        assert_eq!(WeatherCondition::from_wmo_code(40), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(45), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(49), WeatherCondition::Fog);
    }

    #[test]
    fn test_wmo_code_drizzle_decade() {
        assert_eq!(
            WeatherCondition::from_wmo_code(51),
            WeatherCondition::Drizzle
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(59),
            WeatherCondition::Drizzle
        );
    }

    #[test]
    fn test_wmo_code_rain_decade_and_showers() {
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(65), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(80), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(82), WeatherCondition::Rain);
    }

    #[test]
    fn test_wmo_code_snow_decade_and_showers() {
        assert_eq!(WeatherCondition::from_wmo_code(71), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_wmo_code(77), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_wmo_code(85), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_wmo_code(86), WeatherCondition::Snow);
    }

    #[test]
    fn test_wmo_code_thunderstorm() {
        assert_eq!(
            WeatherCondition::from_wmo_code(95),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(99),
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn test_wmo_code_outside_table_is_unknown() {
        assert_eq!(
            WeatherCondition::from_wmo_code(999),
            WeatherCondition::Unknown
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(-1),
            WeatherCondition::Unknown
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(22),
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn test_condition_description() {
        assert_eq!(WeatherCondition::Clear.description(), "Clear");
        assert_eq!(
            WeatherCondition::Thunderstorm.description(),
            "Thunderstorm"
        );
    }

    #[test]
    fn test_point_and_summary_expose_condition() {
        let point = HourlyPoint {
            time: "2024-01-01T12:00".to_string(),
            temperature_c: 4.0,
            weather_code: 61,
        };
        assert_eq!(point.condition(), WeatherCondition::Rain);

        let summary = DailySummary {
            date: "2024-01-02".to_string(),
            min_temp_c: -2.0,
            max_temp_c: 1.0,
            weather_code: 73,
        };
        assert_eq!(summary.condition(), WeatherCondition::Snow);
    }

    #[test]
    fn test_snapshot_round_trips_null_sub_fields() {
        let snapshot = ForecastSnapshot {
            hourly: Some(HourlyBlock {
                time: Some(vec!["2024-01-01T00:00".to_string()]),
                temperature_2m: None,
                weather_code: Some(vec![0]),
            }),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ForecastSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_tolerates_missing_hourly() {
        let back: ForecastSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(back.hourly, None);
    }

    #[test]
    fn test_default_view_is_empty_and_online() {
        let view = ForecastView::default();
        assert!(view.upcoming_today.is_empty());
        assert!(view.daily_summaries.is_empty());
        assert!(!view.is_offline);
    }

    #[test]
    fn test_error_user_messages() {
        let err = WeatherError::NoCandidates("atlantis".into());
        assert!(err.user_message().contains("atlantis"));

        let err = WeatherError::CacheMiss;
        assert!(err.user_message().contains("No saved forecast"));
    }
}
