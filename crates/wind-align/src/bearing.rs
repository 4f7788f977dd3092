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

//! Compass bearing and angular difference.
//!
//! All angles are in degrees, clockwise from true north.

use crate::geo::GeoPoint;

/// Bearing returned when start and end coincide and the direction is undefined.
pub const COINCIDENT_BEARING: f64 = 0.0;

/// Initial great-circle bearing from `start` to `end`, normalized to `[0, 360)`.
///
/// Returns [`COINCIDENT_BEARING`] when the two points coincide (both terms of
/// the `atan2` are zero) instead of an arbitrary signed-zero result.
#[must_use]
pub fn initial_bearing(start: GeoPoint, end: GeoPoint) -> f64 {
    let lat1 = start.lat().to_radians();
    let lat2 = end.lat().to_radians();
    let delta_lon = (end.lon() - start.lon()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    if start == end || (y == 0.0 && x == 0.0) {
        return COINCIDENT_BEARING;
    }

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Minimal absolute difference between two directions, in `[0, 180]`.
///
/// Inputs need not be normalized. The wrap uses floor-mod, so negative
/// differences fold correctly.
#[must_use]
pub fn angle_between(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}
