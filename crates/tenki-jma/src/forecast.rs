//! Forecast document extraction.
//!
//! The upstream forecast endpoint returns an ordered list of documents; the
//! first one carries the short-range series. `timeSeries[0]` holds parallel
//! date / weather-description lists for the first area, `timeSeries[2]`
//! holds a flat temperature list where index `2i` is day i's low and
//! `2i + 1` is day i's high.

use chrono::DateTime;
use serde::Deserialize;

use crate::error::WeatherError;
use crate::text::normalize;
use crate::types::ForecastRecord;

/// Days retained from the upstream short-range series.
pub const SHORT_RANGE_DAYS: usize = 5;

pub(crate) fn forecast_path(area_code: &str) -> String {
    format!("forecast/data/forecast/{area_code}.json")
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastDocument {
    #[serde(rename = "timeSeries", default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeSeries {
    #[serde(rename = "timeDefines", default)]
    pub time_defines: Vec<String>,
    #[serde(default)]
    pub areas: Vec<AreaSeries>,
}

/// Per-area series. Only the first area of each block is consumed; the
/// upstream document's other fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct AreaSeries {
    #[serde(default)]
    pub weathers: Vec<String>,
    #[serde(default)]
    pub temps: Vec<String>,
}

/// Extract up to [`SHORT_RANGE_DAYS`] normalized records from the raw
/// documents for `area_code`.
///
/// A temperature index past the end of the flat series (or a value that does
/// not parse as an integer) leaves that field absent; a missing block or a
/// weather list shorter than the date list is a schema error.
pub(crate) fn extract_records(
    documents: &[ForecastDocument],
    area_code: &str,
) -> Result<Vec<ForecastRecord>, WeatherError> {
    let document = documents
        .first()
        .ok_or_else(|| WeatherError::schema("forecast response is empty"))?;

    let short = document
        .time_series
        .first()
        .ok_or_else(|| WeatherError::schema("missing short-range series"))?;
    let weathers = &short
        .areas
        .first()
        .ok_or_else(|| WeatherError::schema("short-range series has no areas"))?
        .weathers;

    let temps = document
        .time_series
        .get(2)
        .and_then(|series| series.areas.first())
        .map(|area| area.temps.as_slice())
        .ok_or_else(|| WeatherError::schema("missing temperature series"))?;

    let days = short.time_defines.len().min(SHORT_RANGE_DAYS);
    let mut records = Vec::with_capacity(days);

    for day in 0..days {
        let date = DateTime::parse_from_rfc3339(&short.time_defines[day])
            .map_err(|err| {
                WeatherError::Schema(format!(
                    "bad forecast date {:?}: {err}",
                    short.time_defines[day]
                ))
            })?
            .date_naive();

        let weather = weathers.get(day).ok_or_else(|| {
            WeatherError::schema("weather series shorter than date series")
        })?;

        records.push(ForecastRecord {
            area_code: area_code.to_string(),
            date,
            weather: normalize(weather),
            temp_min: parse_temp(temps, 2 * day),
            temp_max: parse_temp(temps, 2 * day + 1),
        });
    }

    Ok(records)
}

fn parse_temp(temps: &[String], index: usize) -> Option<i32> {
    temps.get(index).and_then(|t| t.trim().parse().ok())
}
