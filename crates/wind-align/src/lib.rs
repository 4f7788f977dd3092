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

//! Wind alignment for riding segments.
//!
//! This library decides which route segments run roughly along the current
//! wind. It is organised in layers that can be used on their own:
//!
//! - **Geometry**: validated points and bounding boxes, haversine distance,
//!   initial great-circle bearing and wraparound-safe angle comparison
//! - **Codec**: encoded polyline decoding and encoding (precision 5)
//! - **Filter**: classification of segments as aligned, misaligned or loops
//! - **Pipeline**: provider and renderer ports plus the fetch → filter →
//!   render → write orchestration
//!
//! # Filtering
//!
//! ```
//! use wind_align::{filter_segments, FilterConfig, GeoPoint, Segment};
//!
//! let start = GeoPoint::new(62.58, 29.81).unwrap();
//! let segments = vec![
//!     Segment::new("Lakeside", vec![start, start.destination(10.0, 2_000.0)]).unwrap(),
//!     Segment::new("Ridge", vec![start, start.destination(190.0, 2_000.0)]).unwrap(),
//! ];
//!
//! let result = filter_segments(segments, 20.0, &FilterConfig::default());
//! assert_eq!(result.aligned.len(), 1);
//! assert_eq!(result.aligned[0].name(), "Lakeside");
//! ```
//!
//! # Angles
//!
//! ```
//! use wind_align::bearing::angle_between;
//!
//! assert_eq!(angle_between(350.0, 10.0), 20.0);
//! assert_eq!(angle_between(-90.0, 90.0), 180.0);
//! ```

pub mod bearing;
pub mod error;
pub mod filter;
pub mod geo;
pub mod model;
pub mod pipeline;
pub mod polyline;
pub mod ports;

pub use bearing::{angle_between, initial_bearing, COINCIDENT_BEARING};
pub use error::{BoxError, DecodeError, InvalidInputError, RenderError, SourceError};
pub use filter::{classify, filter_segments, Alignment, FilterConfig, FilterResult};
pub use geo::{BoundingBox, GeoPoint};
pub use model::{Segment, WindSample};
pub use pipeline::{run, PipelineConfig, PipelineError, RunSummary};
pub use ports::{ForecastSource, MapDocument, MapRenderer, SegmentSource};
