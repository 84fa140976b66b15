//! Hourly-to-daily forecast aggregation.
//!
//! Splits a raw hourly series into the hours still ahead of `now` within the
//! first day and per-day min/max summaries for everything after it.

use chrono::NaiveDateTime;

use crate::types::{DailySummary, ForecastSnapshot, HourlyPoint};

// Open-Meteo emits minute precision; cached snapshots may carry seconds.
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Number of leading hourly entries treated as "today".
///
/// The upstream series starts at local midnight, so a fixed 24-entry window
/// covers the first calendar day.
const TODAY_HOURS: usize = 24;

/// Transform a raw forecast into the upcoming-today slice and the per-day
/// summaries beyond it.
///
/// The three hourly sequences are paired positionally and truncated to the
/// shortest one present. The first 24 aligned points are filtered to those at
/// or after `now`, compared as local date-times with no zone conversion.
/// Points beyond the first 24 are grouped by calendar date in first-seen
/// order and reduced to min/max temperature plus the weather code of the
/// first hour at the maximum.
///
/// Missing or empty sequences yield empty outputs; this never fails.
pub fn aggregate(
    snapshot: &ForecastSnapshot,
    now: NaiveDateTime,
) -> (Vec<HourlyPoint>, Vec<DailySummary>) {
    let Some(hourly) = &snapshot.hourly else {
        return (Vec::new(), Vec::new());
    };
    let (Some(times), Some(temps), Some(codes)) =
        (&hourly.time, &hourly.temperature_2m, &hourly.weather_code)
    else {
        return (Vec::new(), Vec::new());
    };

    let points: Vec<HourlyPoint> = times
        .iter()
        .zip(temps.iter())
        .zip(codes.iter())
        .map(|((time, &temperature_c), &weather_code)| HourlyPoint {
            time: time.clone(),
            temperature_c,
            weather_code,
        })
        .collect();

    let upcoming_today = points
        .iter()
        .take(TODAY_HOURS)
        .filter(|point| parse_local(&point.time).is_some_and(|t| t >= now))
        .cloned()
        .collect();

    let remaining = points.get(TODAY_HOURS..).unwrap_or_default();

    (upcoming_today, summarize_days(remaining))
}

/// Parse a forecast timestamp as a time-zone-naive local date-time.
fn parse_local(time: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(time, format).ok())
}

/// Group points by calendar date (first-seen order) and reduce each group to
/// its temperature extremes and representative condition.
fn summarize_days(points: &[HourlyPoint]) -> Vec<DailySummary> {
    let mut days: Vec<(&str, Vec<&HourlyPoint>)> = Vec::new();
    for point in points {
        let date = day_key(&point.time);
        match days.iter_mut().find(|(key, _)| *key == date) {
            Some((_, group)) => group.push(point),
            None => days.push((date, vec![point])),
        }
    }

    days.into_iter()
        .map(|(date, group)| {
            let mut min_temp_c = f64::INFINITY;
            let mut max_temp_c = f64::NEG_INFINITY;
            for point in &group {
                min_temp_c = min_temp_c.min(point.temperature_c);
                max_temp_c = max_temp_c.max(point.temperature_c);
            }
            // First hour that reaches the maximum wins ties.
            let weather_code = group
                .iter()
                .find(|point| point.temperature_c == max_temp_c)
                .map(|point| point.weather_code)
                .unwrap_or(0);

            DailySummary {
                date: date.to_string(),
                min_temp_c,
                max_temp_c,
                weather_code,
            }
        })
        .collect()
}

/// Date portion of a forecast timestamp, `YYYY-MM-DD`.
fn day_key(time: &str) -> &str {
    time.get(..10).unwrap_or(time)
}
