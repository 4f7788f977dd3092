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

//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, BoundingBoxConfig};

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Find riding segments that run with the current wind and plot them on a map."
)]
pub struct Cli {
    /// Configuration file (defaults to the per-user config location)
    #[arg(long, env = "WINDWARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search area as SW_LAT,SW_LNG,NE_LAT,NE_LNG
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBoxConfig>,

    /// Forecast days to request
    #[arg(long)]
    pub days: Option<u8>,

    /// Maximum angle between segment and wind direction, in degrees
    #[arg(long)]
    pub max_angle: Option<f64>,

    /// Start/end distance in meters under which a segment is a loop
    #[arg(long)]
    pub loop_tolerance: Option<f64>,

    /// Output HTML file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the map in the default browser when done
    #[arg(long)]
    pub open: bool,

    /// Write the effective configuration (file plus flags) back to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Print the default configuration file path and exit
    #[arg(long)]
    pub print_config_path: bool,
}

impl Cli {
    /// Overlay command line values onto `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(bbox) = self.bbox {
            config.bounding_box = bbox;
        }
        if let Some(days) = self.days {
            config.forecast_days = days;
        }
        if let Some(max_angle) = self.max_angle {
            config.max_alignment_angle_deg = max_angle;
        }
        if let Some(tolerance) = self.loop_tolerance {
            config.loop_tolerance_m = tolerance;
        }
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
    }
}

fn parse_bbox(value: &str) -> Result<BoundingBoxConfig, String> {
    let parts = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("'{}': {e}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        &[sw_lat, sw_lng, ne_lat, ne_lng] => Ok(BoundingBoxConfig {
            sw_lat,
            sw_lng,
            ne_lat,
            ne_lng,
        }),
        _ => Err(format!("expected 4 comma-separated numbers, got {}", parts.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("60.1, 24.8,60.3,25.1").unwrap();
        assert_eq!(
            bbox,
            BoundingBoxConfig {
                sw_lat: 60.1,
                sw_lng: 24.8,
                ne_lat: 60.3,
                ne_lng: 25.1,
            }
        );
        assert!(parse_bbox("60.1,24.8,60.3").is_err());
        assert!(parse_bbox("60.1,24.8,north,25.1").is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "windward",
            "--bbox",
            "-34.0,18.3,-33.8,18.6",
            "--max-angle",
            "30",
            "--days",
            "2",
            "-o",
            "out/cape.html",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!((config.bounding_box.sw_lat + 34.0).abs() < f64::EPSILON);
        assert!((config.max_alignment_angle_deg - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.forecast_days, 2);
        assert_eq!(config.output_path, PathBuf::from("out/cape.html"));
        // Untouched values keep their defaults
        assert!((config.loop_tolerance_m - AppConfig::default().loop_tolerance_m).abs() < f64::EPSILON);
        assert!(!cli.open);
    }
}
