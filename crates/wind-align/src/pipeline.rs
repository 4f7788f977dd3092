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

//! Fetch, filter, render and write, in that order.
//!
//! Every stage either succeeds or aborts the run; the error says which stage
//! failed. Nothing is written unless rendering succeeded.

use std::path::PathBuf;

use log::{info, warn};
use thiserror::Error;

use crate::error::{RenderError, SourceError};
use crate::filter::{filter_segments, FilterConfig};
use crate::geo::{BoundingBox, GeoPoint};
use crate::model::WindSample;
use crate::ports::{ForecastSource, MapRenderer, SegmentSource};

/// Parameters for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub bounding_box: BoundingBox,
    pub forecast_days: u8,
    pub filter: FilterConfig,
    pub output_path: PathBuf,
}

/// Pipeline failure, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("segment fetch failed: {0}")]
    Segments(#[source] SourceError),

    #[error("wind forecast fetch failed: {0}")]
    Forecast(#[source] SourceError),

    #[error("wind forecast for {0} contained no samples")]
    EmptyForecast(GeoPoint),

    #[error("render failed: {0}")]
    Render(#[source] RenderError),

    #[error("failed to write map to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub center: GeoPoint,
    pub wind: WindSample,
    pub fetched: usize,
    pub aligned: usize,
    pub misaligned: usize,
    pub loops: usize,
    pub output_path: PathBuf,
}

/// Run the whole pipeline once.
pub fn run(
    config: &PipelineConfig,
    segment_source: &dyn SegmentSource,
    forecast_source: &dyn ForecastSource,
    renderer: &dyn MapRenderer,
) -> Result<RunSummary, PipelineError> {
    let bbox = &config.bounding_box;
    info!(
        "Fetching segments between ({}) and ({})",
        bbox.southwest(),
        bbox.northeast()
    );
    let segments = segment_source
        .fetch_segments(bbox)
        .map_err(PipelineError::Segments)?;
    let fetched = segments.len();
    info!("Fetched {} segments", fetched);
    if fetched == 0 {
        warn!("No segments found in the bounding box");
    }

    let center = bbox.center();
    info!(
        "Fetching {}-day wind forecast for ({})",
        config.forecast_days, center
    );
    let forecast = forecast_source
        .fetch_wind_forecast(center, config.forecast_days)
        .map_err(PipelineError::Forecast)?;
    let wind = *forecast
        .first()
        .ok_or(PipelineError::EmptyForecast(center))?;
    info!(
        "Current wind at {}: {:.1} km/h from {:.0}° ({})",
        wind.time(),
        wind.speed_kmh(),
        wind.direction_deg(),
        wind.cardinal()
    );

    let result = filter_segments(segments, wind.direction_deg(), &config.filter);
    info!(
        "{} of {} segments within {}° of the wind ({} misaligned, {} loops skipped)",
        result.aligned.len(),
        fetched,
        config.filter.max_alignment_angle_deg,
        result.misaligned,
        result.loops
    );

    let document = renderer
        .render(&result.aligned, &wind, center)
        .map_err(PipelineError::Render)?;
    document
        .write_to(&config.output_path)
        .map_err(|source| PipelineError::Persist {
            path: config.output_path.clone(),
            source,
        })?;
    info!("Map written to {}", config.output_path.display());

    Ok(RunSummary {
        center,
        wind,
        fetched,
        aligned: result.aligned.len(),
        misaligned: result.misaligned,
        loops: result.loops,
        output_path: config.output_path.clone(),
    })
}
