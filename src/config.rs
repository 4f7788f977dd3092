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

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format.
//! Every field has a default, so a missing or partial file still yields a
//! complete configuration. Command line flags are applied on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wind_align::filter::{DEFAULT_LOOP_TOLERANCE_M, DEFAULT_MAX_ALIGNMENT_ANGLE_DEG};
use wind_align::{BoundingBox, FilterConfig, InvalidInputError, PipelineConfig};

use crate::map::leaflet::DEFAULT_TILE_URL;
use crate::segments::doogal::DEFAULT_SEGMENTS_URL;
use crate::weather::open_meteo::DEFAULT_FORECAST_URL;

const APP_NAME: &str = "windward";
const CONFIG_NAME: &str = "config";

/// Query area as raw corner coordinates (validated when converted).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BoundingBoxConfig {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
}

impl Default for BoundingBoxConfig {
    /// The area around Joensuu, Finland
    fn default() -> Self {
        Self {
            sw_lat: 62.555_646_881_304_91,
            sw_lng: 29.704_366_223_835_024,
            ne_lat: 62.616_312_667_926_59,
            ne_lng: 29.917_382_662_657_19,
        }
    }
}

impl BoundingBoxConfig {
    pub fn to_bounding_box(&self) -> Result<BoundingBox, InvalidInputError> {
        BoundingBox::from_corners(self.sw_lat, self.sw_lng, self.ne_lat, self.ne_lng)
    }
}

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Number of forecast days to request (only the first hour is used)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Maximum angle between segment bearing and wind direction (0 - 180)
    #[serde(default = "default_max_alignment_angle")]
    pub max_alignment_angle_deg: f64,

    /// Segments whose start and end are closer than this (meters) are loops
    #[serde(default = "default_loop_tolerance")]
    pub loop_tolerance_m: f64,

    /// Where the rendered map is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Segment explorer endpoint
    #[serde(default = "default_segments_url")]
    pub segments_url: String,

    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Map tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub zoom_start: u8,

    /// Area to search for segments
    // Must stay last: TOML tables follow plain values
    #[serde(default)]
    pub bounding_box: BoundingBoxConfig,
}

// Default value functions for serde
fn default_forecast_days() -> u8 {
    1
}

fn default_max_alignment_angle() -> f64 {
    DEFAULT_MAX_ALIGNMENT_ANGLE_DEG
}

fn default_loop_tolerance() -> f64 {
    DEFAULT_LOOP_TOLERANCE_M
}

fn default_output_path() -> PathBuf {
    PathBuf::from("wind_segments.html")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_segments_url() -> String {
    DEFAULT_SEGMENTS_URL.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_zoom() -> u8 {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            forecast_days: default_forecast_days(),
            max_alignment_angle_deg: default_max_alignment_angle(),
            loop_tolerance_m: default_loop_tolerance(),
            output_path: default_output_path(),
            request_timeout_secs: default_request_timeout_secs(),
            segments_url: default_segments_url(),
            forecast_url: default_forecast_url(),
            tile_url: default_tile_url(),
            zoom_start: default_zoom(),
            bounding_box: BoundingBoxConfig::default(),
        }
    }
}

/// Problems with configuration values, independent of where they came from.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bounding box: {0}")]
    BoundingBox(#[from] InvalidInputError),

    #[error("max alignment angle {0} must be within [0, 180]")]
    MaxAngle(f64),

    #[error("loop tolerance {0} m must be a non-negative number")]
    LoopTolerance(f64),

    #[error("forecast days must be between 1 and 16, got {0}")]
    ForecastDays(u8),
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file is created with default values.
    pub fn load(path: Option<&Path>) -> Result<Self, confy::ConfyError> {
        match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, CONFIG_NAME),
        }
    }

    /// Save configuration to `path`, or to the default location when `None`.
    pub fn save(&self, path: Option<&Path>) -> Result<(), confy::ConfyError> {
        match path {
            Some(path) => confy::store_path(path, self),
            None => confy::store(APP_NAME, CONFIG_NAME, self),
        }
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// HTTP timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate values and build the pipeline parameters.
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        if !(0.0..=180.0).contains(&self.max_alignment_angle_deg) {
            return Err(ConfigError::MaxAngle(self.max_alignment_angle_deg));
        }
        if !(self.loop_tolerance_m >= 0.0 && self.loop_tolerance_m.is_finite()) {
            return Err(ConfigError::LoopTolerance(self.loop_tolerance_m));
        }
        // Open-Meteo serves at most 16 days
        if !(1..=16).contains(&self.forecast_days) {
            return Err(ConfigError::ForecastDays(self.forecast_days));
        }

        Ok(PipelineConfig {
            bounding_box: self.bounding_box.to_bounding_box()?,
            forecast_days: self.forecast_days,
            filter: FilterConfig {
                max_alignment_angle_deg: self.max_alignment_angle_deg,
                loop_tolerance_m: self.loop_tolerance_m,
            },
            output_path: self.output_path.clone(),
        })
    }
}
