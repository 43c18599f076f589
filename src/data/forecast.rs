use chrono::{FixedOffset, Offset, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{FetchError, http_client};
use crate::domain::{
    series::{HourlySeries, SeriesError},
    weather::{
        CurrentConditions, DailyForecast, ForecastBundle, Location, parse_date,
        parse_local_datetime,
    },
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: http_client(std::time::Duration::from_secs(10)),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, location: Location) -> Result<ForecastBundle, FetchError> {
        debug!(
            latitude = location.latitude,
            longitude = location.longitude,
            "requesting forecast"
        );
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,wind_speed_10m".to_string(),
                ),
                (
                    "hourly",
                    "temperature_2m,relative_humidity_2m,wind_speed_10m".to_string(),
                ),
                (
                    "daily",
                    "weather_code,temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::from_send)?
            .error_for_status()
            .map_err(FetchError::from_send)?;

        let payload: ForecastResponse = response.json().await.map_err(FetchError::Decode)?;
        Ok(payload.into_bundle(location)?)
    }
}

impl ForecastResponse {
    fn into_bundle(self, location: Location) -> Result<ForecastBundle, SeriesError> {
        let utc_offset =
            FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix());
        let (hourly, humidity_now) = match &self.hourly {
            Some(block) => (parse_hourly(block, utc_offset)?, first_humidity(block)),
            None => (HourlySeries::default(), None),
        };

        Ok(ForecastBundle {
            location,
            current: self.current.as_ref().and_then(parse_current),
            humidity_now,
            hourly,
            daily: self.daily.as_ref().map(parse_daily).unwrap_or_default(),
            utc_offset,
            fetched_at: Utc::now(),
        })
    }
}

fn parse_current(current: &CurrentBlock) -> Option<CurrentConditions> {
    Some(CurrentConditions {
        temperature_c: current.temperature_2m?,
        weather_code: current.weather_code,
        wind_speed_kmh: current.wind_speed_10m,
    })
}

/// Pairs timestamps with temperatures. Unparseable timestamps and missing
/// readings drop the whole pair; arrays of different lengths are rejected.
fn parse_hourly(hourly: &HourlyBlock, offset: FixedOffset) -> Result<HourlySeries, SeriesError> {
    let Some(temps) = hourly.temperature_2m.as_ref() else {
        return Ok(HourlySeries::default());
    };
    if temps.len() != hourly.time.len() {
        return Err(SeriesError::InvalidInput {
            times: hourly.time.len(),
            temps: temps.len(),
        });
    }

    let (times, values): (Vec<_>, Vec<_>) = hourly
        .time
        .iter()
        .zip(temps)
        .filter_map(|(raw, temp)| Some((parse_local_datetime(raw, offset)?, (*temp)?)))
        .unzip();
    HourlySeries::new(times, values)
}

fn first_humidity(hourly: &HourlyBlock) -> Option<f32> {
    hourly
        .relative_humidity_2m
        .as_ref()
        .and_then(|values| values.first().copied().flatten())
}

fn parse_daily(daily: &DailyBlock) -> Vec<DailyForecast> {
    let mut out = Vec::new();
    for idx in 0..daily.time.len() {
        let Some(date) = parse_date(&daily.time[idx]) else {
            continue;
        };

        out.push(DailyForecast {
            date,
            weather_code: daily.weather_code.get(idx).copied().flatten(),
            temperature_max_c: daily.temperature_2m_max.get(idx).copied().flatten(),
            temperature_min_c: daily.temperature_2m_min.get(idx).copied().flatten(),
        });
    }
    out
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    current: Option<CurrentBlock>,
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f32>,
    weather_code: Option<i32>,
    wind_speed_10m: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    temperature_2m: Option<Vec<Option<f32>>>,
    relative_humidity_2m: Option<Vec<Option<f32>>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f32>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f32>>,
}
