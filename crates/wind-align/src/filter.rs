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

//! Wind-alignment filtering of route segments.
//!
//! A segment's direction is the bearing from its first to its last point.
//! Loops (start and end within `loop_tolerance_m`) have no meaningful
//! direction and are excluded rather than classified.

use log::debug;

use crate::bearing::angle_between;
use crate::model::Segment;

/// Default maximum deviation between segment bearing and wind direction.
pub const DEFAULT_MAX_ALIGNMENT_ANGLE_DEG: f64 = 45.0;

/// Default start/end distance under which a segment counts as a loop.
pub const DEFAULT_LOOP_TOLERANCE_M: f64 = 50.0;

// Absorbs rounding in the bearing so a zero threshold still keeps exact matches.
const ANGLE_TOLERANCE_DEG: f64 = 1e-9;

/// Thresholds used to classify segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Maximum allowed angle in degrees, `[0, 180]`.
    pub max_alignment_angle_deg: f64,
    /// Segments whose endpoints are this close (meters) are treated as loops.
    pub loop_tolerance_m: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_alignment_angle_deg: DEFAULT_MAX_ALIGNMENT_ANGLE_DEG,
            loop_tolerance_m: DEFAULT_LOOP_TOLERANCE_M,
        }
    }
}

/// Outcome of classifying one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Bearing is within the threshold of the wind direction.
    Aligned { bearing: f64, deviation: f64 },
    /// Bearing deviates by more than the threshold.
    Misaligned { bearing: f64, deviation: f64 },
    /// Start and end (nearly) coincide.
    Loop { end_to_end_m: f64 },
}

impl Alignment {
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        matches!(self, Self::Aligned { .. })
    }
}

/// Aligned segments in input order, plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    pub aligned: Vec<Segment>,
    pub misaligned: usize,
    pub loops: usize,
}

/// Classify a single segment against `wind_direction_deg`.
#[must_use]
pub fn classify(segment: &Segment, wind_direction_deg: f64, config: &FilterConfig) -> Alignment {
    let end_to_end_m = segment.end_to_end_m();
    if end_to_end_m <= config.loop_tolerance_m {
        return Alignment::Loop { end_to_end_m };
    }

    let bearing = segment.bearing();
    let deviation = angle_between(bearing, wind_direction_deg);
    if deviation <= config.max_alignment_angle_deg + ANGLE_TOLERANCE_DEG {
        Alignment::Aligned { bearing, deviation }
    } else {
        Alignment::Misaligned { bearing, deviation }
    }
}

/// Keep the segments that run within the configured angle of the wind.
///
/// Order is preserved. Loops are excluded and counted in [`FilterResult::loops`].
#[must_use]
pub fn filter_segments(
    segments: Vec<Segment>,
    wind_direction_deg: f64,
    config: &FilterConfig,
) -> FilterResult {
    let mut result = FilterResult::default();

    for segment in segments {
        let alignment = classify(&segment, wind_direction_deg, config);
        debug!("{}: {:?}", segment.name(), alignment);
        match alignment {
            Alignment::Aligned { .. } => result.aligned.push(segment),
            Alignment::Misaligned { .. } => result.misaligned += 1,
            Alignment::Loop { .. } => result.loops += 1,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    const ORIGIN: (f64, f64) = (62.58, 29.81);

    /// Straight 2 km segment leaving `ORIGIN` at `bearing`.
    fn segment_with_bearing(name: &str, bearing: f64) -> Segment {
        let start = GeoPoint::new(ORIGIN.0, ORIGIN.1).unwrap();
        Segment::new(name, vec![start, start.destination(bearing, 2_000.0)]).unwrap()
    }

    fn loop_segment(name: &str) -> Segment {
        let start = GeoPoint::new(ORIGIN.0, ORIGIN.1).unwrap();
        Segment::new(
            name,
            vec![
                start,
                start.destination(0.0, 1_000.0),
                start.destination(90.0, 1_000.0),
                start.destination(180.0, 10.0),
            ],
        )
        .unwrap()
    }

    fn names(result: &FilterResult) -> Vec<&str> {
        result.aligned.iter().map(Segment::name).collect()
    }

    #[test]
    fn test_synthetic_bearings() {
        for bearing in [10.0, 100.0, 190.0, 300.0] {
            let segment = segment_with_bearing("s", bearing);
            assert!((segment.bearing() - bearing).abs() < 0.01, "bearing {bearing}");
        }
    }

    #[test]
    fn test_scenario_only_first_segment_matches() {
        let segments = vec![
            segment_with_bearing("ten", 10.0),
            segment_with_bearing("hundred", 100.0),
            segment_with_bearing("one-ninety", 190.0),
        ];
        let result = filter_segments(segments, 20.0, &FilterConfig::default());
        assert_eq!(names(&result), vec!["ten"]);
        assert_eq!(result.misaligned, 2);
        assert_eq!(result.loops, 0);
    }

    #[test]
    fn test_wraparound_alignment() {
        let segments = vec![
            segment_with_bearing("north-west", 350.0),
            segment_with_bearing("east", 90.0),
        ];
        let result = filter_segments(segments, 15.0, &FilterConfig::default());
        assert_eq!(names(&result), vec!["north-west"]);
    }

    #[test]
    fn test_zero_threshold_keeps_exact_matches() {
        let exact = Segment::new(
            "equator-east",
            vec![GeoPoint::new(0.0, 0.0).unwrap(), GeoPoint::new(0.0, 1.0).unwrap()],
        )
        .unwrap();
        let near = segment_with_bearing("near", 91.0);
        let config = FilterConfig {
            max_alignment_angle_deg: 0.0,
            ..FilterConfig::default()
        };
        let result = filter_segments(vec![exact, near], 90.0, &config);
        assert_eq!(names(&result), vec!["equator-east"]);
        assert_eq!(result.misaligned, 1);
    }

    #[test]
    fn test_full_threshold_keeps_everything_but_loops() {
        let segments: Vec<_> = [0.0, 45.0, 135.0, 180.0, 225.0, 359.0]
            .iter()
            .enumerate()
            .map(|(i, &b)| segment_with_bearing(&format!("s{i}"), b))
            .collect();
        let mut input = segments.clone();
        input.push(loop_segment("loop"));

        let config = FilterConfig {
            max_alignment_angle_deg: 180.0,
            ..FilterConfig::default()
        };
        let result = filter_segments(input, 0.0, &config);
        assert_eq!(result.aligned, segments);
        assert_eq!(result.loops, 1);
        assert_eq!(result.misaligned, 0);
    }

    #[test]
    fn test_order_is_preserved() {
        let segments = vec![
            segment_with_bearing("c", 30.0),
            segment_with_bearing("skip", 200.0),
            segment_with_bearing("a", 10.0),
            segment_with_bearing("b", 50.0),
        ];
        let result = filter_segments(segments, 30.0, &FilterConfig::default());
        assert_eq!(names(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_loops_are_excluded() {
        let lap = loop_segment("lap");
        let alignment = classify(&lap, 0.0, &FilterConfig::default());
        assert!(matches!(alignment, Alignment::Loop { end_to_end_m } if end_to_end_m < 50.0));

        // Exactly coincident endpoints are a loop even with zero tolerance
        let start = GeoPoint::new(ORIGIN.0, ORIGIN.1).unwrap();
        let closed = Segment::new("closed", vec![start, start.destination(45.0, 500.0), start]).unwrap();
        let config = FilterConfig {
            loop_tolerance_m: 0.0,
            ..FilterConfig::default()
        };
        assert!(matches!(classify(&closed, 0.0, &config), Alignment::Loop { .. }));

        let result = filter_segments(vec![lap, closed], 0.0, &FilterConfig::default());
        assert!(result.aligned.is_empty());
        assert_eq!(result.loops, 2);
    }

    #[test]
    fn test_classify_reports_deviation() {
        let segment = segment_with_bearing("s", 100.0);
        match classify(&segment, 20.0, &FilterConfig::default()) {
            Alignment::Misaligned { bearing, deviation } => {
                assert!((bearing - 100.0).abs() < 0.01);
                assert!((deviation - 80.0).abs() < 0.01);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(classify(&segment, 120.0, &FilterConfig::default()).is_aligned());
    }

    #[test]
    fn test_empty_input() {
        let result = filter_segments(Vec::new(), 0.0, &FilterConfig::default());
        assert_eq!(result, FilterResult::default());
    }
}
