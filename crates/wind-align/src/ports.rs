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

//! Boundaries to the outside world.
//!
//! Segment lookup, forecasts and map output are traits so the filtering
//! pipeline can run against synthetic data.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{RenderError, SourceError};
use crate::geo::{BoundingBox, GeoPoint};
use crate::model::{Segment, WindSample};

/// Provider of route segments inside a bounding box.
pub trait SegmentSource {
    fn fetch_segments(&self, bbox: &BoundingBox) -> Result<Vec<Segment>, SourceError>;
}

/// Provider of hourly wind forecasts.
pub trait ForecastSource {
    /// Samples for `point` covering `days` days, ordered by time ascending.
    fn fetch_wind_forecast(&self, point: GeoPoint, days: u8)
        -> Result<Vec<WindSample>, SourceError>;
}

/// Draws segments and the wind marker into a viewable document.
pub trait MapRenderer {
    fn render(
        &self,
        segments: &[Segment],
        wind: &WindSample,
        center: GeoPoint,
    ) -> Result<MapDocument, RenderError>;
}

/// A rendered map, held in memory until written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDocument {
    contents: String,
}

impl MapDocument {
    #[must_use]
    pub fn new(contents: String) -> Self {
        Self { contents }
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Write the document, creating missing parent directories.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.contents)
    }
}
