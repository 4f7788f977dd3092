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

//! Error types shared by the geometry, codec and provider layers.

use thiserror::Error;

use crate::geo::GeoPoint;

/// Boxed error used to carry transport failures from adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Geometry or sample values that violate a model invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    #[error("bounding box southwest corner ({sw}) lies north or east of northeast corner ({ne})")]
    InvertedBoundingBox { sw: GeoPoint, ne: GeoPoint },

    #[error("segment '{name}' has {points} point(s), at least 2 are required")]
    DegenerateSegment { name: String, points: usize },

    #[error("wind speed {0} km/h must be a non-negative number")]
    WindSpeed(f64),

    #[error("wind direction {0} is not a finite number")]
    WindDirection(f64),
}

/// Errors raised while decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid character {character:?} at byte {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("encoded value truncated at byte {position}")]
    Truncated { position: usize },

    #[error("encoded value at byte {position} is too long")]
    Overflow { position: usize },

    #[error("decoded point #{index} lies outside valid coordinate ranges")]
    OutOfRange { index: usize },
}

/// Errors returned by segment and forecast providers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[source] BoxError),

    #[error("unexpected response format: {0}")]
    DataFormat(String),

    #[error("malformed polyline for segment '{segment}': {source}")]
    Decode {
        segment: String,
        #[source]
        source: DecodeError,
    },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl SourceError {
    /// Wrap any transport error as [`SourceError::Network`].
    pub fn network<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Network(err.into())
    }
}

/// Failure while producing a map document.
#[derive(Debug, Error)]
#[error("map rendering failed: {message}")]
pub struct RenderError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl RenderError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
