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

//! Doogal Strava segment explorer client.

use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;
use wind_align::{BoundingBox, Segment, SegmentSource, SourceError};

use crate::http;

/// Default segment explorer endpoint.
pub const DEFAULT_SEGMENTS_URL: &str = "https://www.doogal.co.uk/StravaSegments";

/// Raw segment as returned by the explorer. Only the fields we use.
#[derive(Debug, Deserialize)]
struct RawSegment {
    name: String,
    map: RawMap,
}

#[derive(Debug, Deserialize)]
struct RawMap {
    polyline: String,
}

/// The explorer answers with a bare list; some mirrors wrap it in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SegmentsResponse {
    List(Vec<RawSegment>),
    Wrapped { segments: Vec<RawSegment> },
}

impl SegmentsResponse {
    fn into_segments(self) -> Vec<RawSegment> {
        match self {
            Self::List(segments) | Self::Wrapped { segments } => segments,
        }
    }
}

/// Segment source backed by the Doogal explorer.
#[derive(Debug, Clone)]
pub struct DoogalSegments {
    client: Client,
    base_url: String,
}

impl DoogalSegments {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Query parameters for a bounding box. Type, category and order are fixed.
    fn query(bbox: &BoundingBox) -> Vec<(&'static str, String)> {
        let sw = bbox.southwest();
        let ne = bbox.northeast();
        vec![
            ("swLat", sw.lat().to_string()),
            ("swLng", sw.lon().to_string()),
            ("neLat", ne.lat().to_string()),
            ("neLng", ne.lon().to_string()),
            ("type", "riding".to_string()),
            ("min_cat", "0".to_string()),
            ("orderBy", "nearest".to_string()),
        ]
    }
}

impl SegmentSource for DoogalSegments {
    fn fetch_segments(&self, bbox: &BoundingBox) -> Result<Vec<Segment>, SourceError> {
        let body = http::get_text(&self.client, &self.base_url, &Self::query(bbox))?;
        let segments = parse_segments(&body)?;
        info!("Decoded {} segments from {}", segments.len(), self.base_url);
        Ok(segments)
    }
}

/// Parse an explorer response body and decode every segment's polyline.
pub fn parse_segments(body: &str) -> Result<Vec<Segment>, SourceError> {
    let response: SegmentsResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::DataFormat(format!("segment list: {e}")))?;

    response
        .into_segments()
        .into_iter()
        .map(|raw| Segment::from_encoded(raw.name, &raw.map.polyline))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments_list() {
        let body = r#"[
            {"id": 1, "name": "Reference", "map": {"polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"}},
            {"id": 2, "name": "Short", "distance": 812.5, "map": {"id": "s2", "polyline": "_p~iF~ps|U_ulLnnqC"}}
        ]"#;
        let segments = parse_segments(body).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].name(), "Reference");
        assert_eq!(segments[0].path().len(), 3);
        assert_eq!(segments[1].name(), "Short");
        assert_eq!(segments[1].path().len(), 2);
    }

    #[test]
    fn test_parse_segments_wrapped() {
        let body = r#"{"segments": [{"name": "Wrapped", "map": {"polyline": "_p~iF~ps|U_ulLnnqC"}}]}"#;
        let segments = parse_segments(body).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].name(), "Wrapped");
    }

    #[test]
    fn test_parse_segments_empty() {
        assert!(parse_segments("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_segments_missing_polyline() {
        let body = r#"[{"name": "No map"}]"#;
        assert!(matches!(parse_segments(body), Err(SourceError::DataFormat(_))));

        let body = r#"[{"name": "No polyline", "map": {}}]"#;
        assert!(matches!(parse_segments(body), Err(SourceError::DataFormat(_))));
    }

    #[test]
    fn test_parse_segments_not_json() {
        assert!(matches!(
            parse_segments("<html>rate limited</html>"),
            Err(SourceError::DataFormat(_))
        ));
    }

    #[test]
    fn test_parse_segments_bad_polyline() {
        let body = r#"[{"name": "Broken", "map": {"polyline": "_p~iF"}}]"#;
        assert!(matches!(
            parse_segments(body),
            Err(SourceError::Decode { ref segment, .. }) if segment == "Broken"
        ));
    }

    #[test]
    fn test_query_parameters() {
        let bbox = BoundingBox::from_corners(62.5, 29.7, 62.6, 29.9).unwrap();
        let query = DoogalSegments::query(&bbox);
        assert_eq!(query[0], ("swLat", "62.5".to_string()));
        assert_eq!(query[1], ("swLng", "29.7".to_string()));
        assert_eq!(query[2], ("neLat", "62.6".to_string()));
        assert_eq!(query[3], ("neLng", "29.9".to_string()));
        assert!(query.contains(&("type", "riding".to_string())));
        assert!(query.contains(&("orderBy", "nearest".to_string())));
    }
}
