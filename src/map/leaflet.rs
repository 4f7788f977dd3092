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

//! Leaflet HTML renderer.
//!
//! The page loads Leaflet from a CDN and draws everything from one JSON blob
//! embedded in a script tag. Segment names go through `textContent`, so they
//! are never interpreted as markup.

use serde::Serialize;
use wind_align::{GeoPoint, MapDocument, MapRenderer, RenderError, Segment, WindSample};

/// Default OpenStreetMap tile template.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

const ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const DATA_PLACEHOLDER: &str = "__MAP_DATA__";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Wind-aligned segments</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map { height: 100%; margin: 0; }
.wind-arrow { font-size: 32px; line-height: 40px; text-align: center; color: #1f6feb; }
.wind-tooltip { white-space: pre; }
</style>
</head>
<body>
<div id="map"></div>
<script id="map-data" type="application/json">__MAP_DATA__</script>
<script>
const data = JSON.parse(document.getElementById("map-data").textContent);
const map = L.map("map").setView(data.center, data.zoom);
L.tileLayer(data.tiles.url, { maxZoom: 19, attribution: data.tiles.attribution }).addTo(map);

for (const segment of data.segments) {
  const label = document.createElement("span");
  label.textContent = segment.name;
  L.polyline(segment.points, data.line).bindTooltip(label).addTo(map);
}

const arrow = L.divIcon({
  className: "",
  html: '<div class="wind-arrow" style="transform: rotate(' + data.wind.arrow_rotation_deg + 'deg)">&#8593;</div>',
  iconSize: [40, 40],
  iconAnchor: [20, 20],
});
const windLabel = document.createElement("span");
windLabel.className = "wind-tooltip";
windLabel.textContent = data.wind.label;
L.marker(data.center, { icon: arrow }).bindTooltip(windLabel).addTo(map);
</script>
</body>
</html>
"#;

/// Polyline styling.
#[derive(Debug, Clone, Serialize)]
struct LineStyle {
    color: &'static str,
    weight: u8,
    opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "black",
            weight: 3,
            opacity: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct TileLayer<'a> {
    url: &'a str,
    attribution: &'static str,
}

#[derive(Debug, Serialize)]
struct SegmentLine<'a> {
    name: &'a str,
    points: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
struct WindMarker {
    label: String,
    arrow_rotation_deg: f64,
}

#[derive(Debug, Serialize)]
struct MapData<'a> {
    center: [f64; 2],
    zoom: u8,
    tiles: TileLayer<'a>,
    line: LineStyle,
    segments: Vec<SegmentLine<'a>>,
    wind: WindMarker,
}

/// Renders a standalone Leaflet page.
#[derive(Debug, Clone)]
pub struct LeafletRenderer {
    zoom: u8,
    tile_url: String,
}

impl LeafletRenderer {
    pub fn new(zoom: u8, tile_url: impl Into<String>) -> Self {
        Self {
            zoom,
            tile_url: tile_url.into(),
        }
    }
}

impl Default for LeafletRenderer {
    fn default() -> Self {
        Self::new(12, DEFAULT_TILE_URL)
    }
}

/// Tooltip text for the wind marker.
fn wind_label(wind: &WindSample) -> String {
    format!(
        "Wind speed: {:.1} km/h\nWind direction: {:.0}° ({})\nForecast hour: {}",
        wind.speed_kmh(),
        wind.direction_deg(),
        wind.cardinal(),
        wind.time().format("%Y-%m-%d %H:%M")
    )
}

impl MapRenderer for LeafletRenderer {
    fn render(
        &self,
        segments: &[Segment],
        wind: &WindSample,
        center: GeoPoint,
    ) -> Result<MapDocument, RenderError> {
        let data = MapData {
            center: [center.lat(), center.lon()],
            zoom: self.zoom,
            tiles: TileLayer {
                url: &self.tile_url,
                attribution: ATTRIBUTION,
            },
            line: LineStyle::default(),
            segments: segments
                .iter()
                .map(|segment| SegmentLine {
                    name: segment.name(),
                    points: segment.path().iter().map(|p| [p.lat(), p.lon()]).collect(),
                })
                .collect(),
            wind: WindMarker {
                label: wind_label(wind),
                // Direction is where the wind comes from; the arrow shows where it goes
                arrow_rotation_deg: (wind.direction_deg() + 180.0) % 360.0,
            },
        };

        let json = serde_json::to_string(&data)
            .map_err(|e| RenderError::with_source("could not serialize map data", e))?;
        // Keep the payload from closing its script element early
        let json = json.replace("</", "<\\/");

        Ok(MapDocument::new(TEMPLATE.replacen(DATA_PLACEHOLDER, &json, 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wind(direction: f64) -> WindSample {
        let time = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        WindSample::new(time, 14.4, direction).unwrap()
    }

    fn embedded_data(html: &str) -> serde_json::Value {
        let start = html.find(r#"type="application/json">"#).unwrap() + 24;
        let end = start + html[start..].find("</script>").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn test_render_embeds_segments_and_wind() {
        let segment = Segment::from_encoded("Reference", "_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        let center = GeoPoint::new(40.0, -122.0).unwrap();
        let document = LeafletRenderer::default()
            .render(&[segment], &wind(225.0), center)
            .unwrap();

        let html = document.contents();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains(DATA_PLACEHOLDER));

        let data = embedded_data(html);
        assert_eq!(data["center"][0], 40.0);
        assert_eq!(data["zoom"], 12);
        assert_eq!(data["segments"].as_array().unwrap().len(), 1);
        assert_eq!(data["segments"][0]["name"], "Reference");
        assert_eq!(data["segments"][0]["points"][0][0], 38.5);
        assert_eq!(data["line"]["color"], "black");
        assert_eq!(data["wind"]["arrow_rotation_deg"], 45.0);

        let label = data["wind"]["label"].as_str().unwrap();
        assert!(label.contains("Wind speed: 14.4 km/h"));
        assert!(label.contains("Wind direction: 225° (SW)"));
        assert!(label.contains("2024-05-01 09:00"));
    }

    #[test]
    fn test_render_without_segments() {
        let center = GeoPoint::new(62.58, 29.81).unwrap();
        let document = LeafletRenderer::new(10, DEFAULT_TILE_URL)
            .render(&[], &wind(0.0), center)
            .unwrap();
        let data = embedded_data(document.contents());
        assert!(data["segments"].as_array().unwrap().is_empty());
        assert_eq!(data["zoom"], 10);
        assert_eq!(data["wind"]["arrow_rotation_deg"], 180.0);
    }

    #[test]
    fn test_segment_names_cannot_close_script() {
        let start = GeoPoint::new(62.58, 29.81).unwrap();
        let segment = Segment::new(
            "</script><script>alert(1)</script>",
            vec![start, start.destination(90.0, 800.0)],
        )
        .unwrap();
        let document = LeafletRenderer::default()
            .render(&[segment], &wind(90.0), start)
            .unwrap();

        let html = document.contents();
        assert!(!html.contains("</script><script>alert(1)"));
        let data = embedded_data(html);
        assert_eq!(
            data["segments"][0]["name"],
            "</script><script>alert(1)</script>"
        );
    }
}
