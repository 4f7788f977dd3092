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

//! Route segments and wind samples.

use chrono::NaiveDateTime;

use crate::bearing::initial_bearing;
use crate::error::{InvalidInputError, SourceError};
use crate::geo::GeoPoint;
use crate::polyline;

/// A named route segment with its decoded path.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    name: String,
    path: Vec<GeoPoint>,
}

impl Segment {
    /// Create a segment. The path needs a start and an end point.
    pub fn new(name: impl Into<String>, path: Vec<GeoPoint>) -> Result<Self, InvalidInputError> {
        let name = name.into();
        if path.len() < 2 {
            return Err(InvalidInputError::DegenerateSegment {
                name,
                points: path.len(),
            });
        }
        Ok(Self { name, path })
    }

    /// Create a segment from an encoded polyline.
    pub fn from_encoded(name: impl Into<String>, encoded: &str) -> Result<Self, SourceError> {
        let name = name.into();
        let path = polyline::decode(encoded).map_err(|source| SourceError::Decode {
            segment: name.clone(),
            source,
        })?;
        Ok(Self::new(name, path)?)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    #[must_use]
    pub fn start(&self) -> GeoPoint {
        self.path[0]
    }

    #[must_use]
    pub fn end(&self) -> GeoPoint {
        self.path[self.path.len() - 1]
    }

    /// Bearing from the first to the last point, ignoring the path in between.
    #[must_use]
    pub fn bearing(&self) -> f64 {
        initial_bearing(self.start(), self.end())
    }

    /// Straight-line distance between the first and last point in meters.
    #[must_use]
    pub fn end_to_end_m(&self) -> f64 {
        self.start().distance_m(&self.end())
    }
}

/// Hourly wind forecast value.
///
/// `direction_deg` follows the meteorological convention: the direction the
/// wind is coming from, clockwise from north, in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    time: NaiveDateTime,
    speed_kmh: f64,
    direction_deg: f64,
}

impl WindSample {
    /// Create a sample. Direction is folded into `[0, 360)`.
    pub fn new(
        time: NaiveDateTime,
        speed_kmh: f64,
        direction_deg: f64,
    ) -> Result<Self, InvalidInputError> {
        if !(speed_kmh >= 0.0 && speed_kmh.is_finite()) {
            return Err(InvalidInputError::WindSpeed(speed_kmh));
        }
        if !direction_deg.is_finite() {
            return Err(InvalidInputError::WindDirection(direction_deg));
        }
        Ok(Self {
            time,
            speed_kmh,
            direction_deg: direction_deg.rem_euclid(360.0) % 360.0,
        })
    }

    #[must_use]
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    #[must_use]
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    #[must_use]
    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    /// 16-point compass name for the wind direction (N, NNE, NE, ...).
    #[must_use]
    pub fn cardinal(&self) -> &'static str {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
            "NW", "NNW",
        ];
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "direction is normalized to [0, 360)"
        )]
        let index = ((self.direction_deg / 22.5).round() as usize) % POINTS.len();
        POINTS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_segment_requires_two_points() {
        assert_eq!(
            Segment::new("Empty", vec![]),
            Err(InvalidInputError::DegenerateSegment {
                name: "Empty".to_string(),
                points: 0
            })
        );
        assert!(Segment::new("Dot", vec![point(62.0, 29.0)]).is_err());
        assert!(Segment::new("Line", vec![point(62.0, 29.0), point(62.1, 29.0)]).is_ok());
    }

    #[test]
    fn test_segment_endpoints_and_bearing() {
        let segment = Segment::new(
            "Harbour sprint",
            vec![point(0.0, 0.0), point(0.5, 0.5), point(0.0, 1.0)],
        )
        .unwrap();
        assert_eq!(segment.start(), point(0.0, 0.0));
        assert_eq!(segment.end(), point(0.0, 1.0));
        // Intermediate curvature is ignored
        assert!((segment.bearing() - 90.0).abs() < 1e-9);
        assert!(segment.end_to_end_m() > 100_000.0);
    }

    #[test]
    fn test_segment_from_encoded() {
        let segment = Segment::from_encoded("Reference", "_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_eq!(segment.name(), "Reference");
        assert_eq!(segment.path().len(), 3);
    }

    #[test]
    fn test_segment_from_encoded_errors() {
        let err = Segment::from_encoded("Broken", "_p~iF").unwrap_err();
        assert!(matches!(err, SourceError::Decode { ref segment, .. } if segment == "Broken"));

        // A single decoded point is not a usable segment
        let err = Segment::from_encoded("Single", "_p~iF~ps|U").unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidInput(InvalidInputError::DegenerateSegment { points: 1, .. })
        ));
    }

    #[test]
    fn test_wind_sample_normalizes_direction() {
        assert_eq!(WindSample::new(noon(), 10.0, 360.0).unwrap().direction_deg(), 0.0);
        assert!((WindSample::new(noon(), 10.0, -90.0).unwrap().direction_deg() - 270.0).abs() < 1e-9);
        assert!((WindSample::new(noon(), 10.0, 725.0).unwrap().direction_deg() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_sample_validation() {
        assert_eq!(
            WindSample::new(noon(), -1.0, 0.0),
            Err(InvalidInputError::WindSpeed(-1.0))
        );
        assert!(WindSample::new(noon(), f64::NAN, 0.0).is_err());
        assert!(WindSample::new(noon(), 5.0, f64::INFINITY).is_err());
        assert!(WindSample::new(noon(), 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_cardinal() {
        let cardinal = |deg| WindSample::new(noon(), 5.0, deg).unwrap().cardinal();
        assert_eq!(cardinal(0.0), "N");
        assert_eq!(cardinal(22.5), "NNE");
        assert_eq!(cardinal(90.0), "E");
        assert_eq!(cardinal(200.0), "SSW");
        assert_eq!(cardinal(270.0), "W");
        assert_eq!(cardinal(350.0), "N");
    }
}
