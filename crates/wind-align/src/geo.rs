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

//! Geographic primitives.
//!
//! Points and query boxes are validated on construction, so everything
//! downstream can assume WGS84 degrees within range.

use std::fmt;

use crate::error::InvalidInputError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidInputError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidInputError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidInputError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in meters (haversine).
    #[must_use]
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Point reached by travelling `distance_m` along the great circle that
    /// leaves this point at `bearing_deg`.
    #[must_use]
    pub fn destination(&self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint {
            lat: lat2.to_degrees().clamp(-90.0, 90.0),
            lon: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Rectangular query region defined by its southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    southwest: GeoPoint,
    northeast: GeoPoint,
}

impl BoundingBox {
    /// Create a box; the southwest corner must not lie north or east of the
    /// northeast corner.
    pub fn new(southwest: GeoPoint, northeast: GeoPoint) -> Result<Self, InvalidInputError> {
        if southwest.lat > northeast.lat || southwest.lon > northeast.lon {
            return Err(InvalidInputError::InvertedBoundingBox {
                sw: southwest,
                ne: northeast,
            });
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }

    /// Convenience constructor from raw corner coordinates.
    pub fn from_corners(
        sw_lat: f64,
        sw_lon: f64,
        ne_lat: f64,
        ne_lon: f64,
    ) -> Result<Self, InvalidInputError> {
        Self::new(GeoPoint::new(sw_lat, sw_lon)?, GeoPoint::new(ne_lat, ne_lon)?)
    }

    #[must_use]
    pub fn southwest(&self) -> GeoPoint {
        self.southwest
    }

    #[must_use]
    pub fn northeast(&self) -> GeoPoint {
        self.northeast
    }

    /// Arithmetic mean of the two corners.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.southwest.lat + self.northeast.lat) / 2.0,
            lon: (self.southwest.lon + self.northeast.lon) / 2.0,
        }
    }

    /// Whether `point` lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.southwest.lat
            && point.lat <= self.northeast.lat
            && point.lon >= self.southwest.lon
            && point.lon <= self.northeast.lon
    }
}
