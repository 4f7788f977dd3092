// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Open-Meteo hourly wind forecast client.

use chrono::NaiveDateTime;
use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use wind_align::{ForecastSource, GeoPoint, SourceError, WindSample};

use crate::http;

/// Default forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Timestamp format of `hourly.time` (local ISO 8601 without seconds).
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyData,
}

/// Parallel arrays, one entry per hour.
#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    windspeed_10m: Vec<Option<f64>>,
    winddirection_10m: Vec<Option<f64>>,
}

/// Forecast source backed by Open-Meteo.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    client: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn query(point: GeoPoint, days: u8) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", point.lat().to_string()),
            ("longitude", point.lon().to_string()),
            ("hourly", "windspeed_10m,winddirection_10m".to_string()),
            ("forecast_days", days.to_string()),
        ]
    }
}

impl ForecastSource for OpenMeteoForecast {
    fn fetch_wind_forecast(
        &self,
        point: GeoPoint,
        days: u8,
    ) -> Result<Vec<WindSample>, SourceError> {
        let body = http::get_text(&self.client, &self.base_url, &Self::query(point, days))?;
        let samples = parse_forecast(&body)?;
        info!("Received {} hourly wind samples", samples.len());
        Ok(samples)
    }
}

/// Parse a forecast body into samples ordered by time.
///
/// The three hourly arrays must have equal length and contain no nulls.
pub fn parse_forecast(body: &str) -> Result<Vec<WindSample>, SourceError> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::DataFormat(format!("forecast: {e}")))?;
    let hourly = response.hourly;

    if hourly.time.len() != hourly.windspeed_10m.len()
        || hourly.time.len() != hourly.winddirection_10m.len()
    {
        return Err(SourceError::DataFormat(format!(
            "hourly arrays differ in length (time {}, speed {}, direction {})",
            hourly.time.len(),
            hourly.windspeed_10m.len(),
            hourly.winddirection_10m.len()
        )));
    }

    let mut samples = hourly
        .time
        .iter()
        .zip(&hourly.windspeed_10m)
        .zip(&hourly.winddirection_10m)
        .map(|((time, speed), direction)| {
            let time = NaiveDateTime::parse_from_str(time, TIME_FORMAT)
                .map_err(|e| SourceError::DataFormat(format!("invalid time '{time}': {e}")))?;
            let (Some(speed), Some(direction)) = (speed, direction) else {
                return Err(SourceError::DataFormat(format!("missing wind value at {time}")));
            };
            Ok(WindSample::new(time, *speed, *direction)?)
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    if samples.windows(2).any(|pair| pair[0].time() > pair[1].time()) {
        warn!("Forecast hours arrived out of order, sorting");
        samples.sort_by_key(WindSample::time);
    }

    Ok(samples)
}
