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

//! Encoded polyline codec (precision 5).
//!
//! Each coordinate is stored as a zig-zag encoded delta from the previous
//! point, split into 5-bit chunks offset by 63 so the output is printable
//! ASCII. A set `0x20` bit marks that another chunk follows.

use crate::error::DecodeError;
use crate::geo::GeoPoint;

const FACTOR: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
// Seven chunks cover 35 bits, well above a full 360 degree delta at 1e5.
const MAX_SHIFT: u32 = 30;

/// Decode an encoded polyline into an ordered list of points.
///
/// An empty string decodes to an empty list.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while position < bytes.len() {
        lat += next_value(bytes, &mut position)?;
        lon += next_value(bytes, &mut position)?;

        let point = GeoPoint::new(lat as f64 / FACTOR, lon as f64 / FACTOR).map_err(|_err| {
            DecodeError::OutOfRange {
                index: points.len(),
            }
        })?;
        points.push(point);
    }

    Ok(points)
}

/// Encode points as a polyline string.
///
/// Coordinates are rounded to five decimal places.
#[must_use]
pub fn encode(points: &[GeoPoint]) -> String {
    let mut output = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = quantize(point.lat());
        let lon = quantize(point.lon());
        push_value(lat - prev_lat, &mut output);
        push_value(lon - prev_lon, &mut output);
        prev_lat = lat;
        prev_lon = lon;
    }

    output
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "coordinates are bounded to +-180 degrees"
)]
fn quantize(degrees: f64) -> i64 {
    (degrees * FACTOR).round() as i64
}

fn next_value(bytes: &[u8], position: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(DecodeError::Truncated {
                position: *position,
            });
        };
        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                character: char::from(byte),
                position: *position,
            });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow {
                position: *position,
            });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *position += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}

fn push_value(value: i64, output: &mut String) {
    let mut remaining = if value < 0 { !(value << 1) } else { value << 1 };

    while remaining >= CONTINUATION_BIT {
        output.push(to_char((CONTINUATION_BIT | (remaining & CHUNK_MASK)) + i64::from(CHUNK_OFFSET)));
        remaining >>= 5;
    }
    output.push(to_char(remaining + i64::from(CHUNK_OFFSET)));
}

fn to_char(value: i64) -> char {
    // Chunks are at most 0x3f, so the offset value always fits printable ASCII
    u8::try_from(value).map_or('?', char::from)
}
