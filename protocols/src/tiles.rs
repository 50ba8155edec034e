//! Tiles API: TileJSON metadata, map styles, vector tiles and static map images.
//!
//! Static image and vector tile parameters arrive as strings and are parsed
//! into typed views (`CenterView`, `BoundedView`, `ImageSize`, `TileCoordinate`)
//! right before the provider URL is built. Fields are parsed in a fixed order
//! and the first bad field decides the error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validated::{
    check_required, parse_coordinate, parse_dimension, Validate, ValidationError,
};

// ── Parameters ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayOfDataParams {
    pub dataset_name: String,
}

impl ArrayOfDataParams {
    pub fn new(dataset_name: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
        }
    }
}

impl Validate for ArrayOfDataParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("datasetName", &self.dataset_name)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDetailsParams {
    pub style_name: String,
}

impl StyleDetailsParams {
    pub fn new(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
        }
    }
}

impl Validate for StyleDetailsParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("styleName", &self.style_name)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorTileParams {
    pub dataset_name: String,
    pub z: String,
    pub x: String,
    pub y: String,
}

impl VectorTileParams {
    pub fn new(
        dataset_name: impl Into<String>,
        z: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            z: z.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn parse(&self) -> Result<TileCoordinate, ValidationError> {
        Ok(TileCoordinate {
            z: parse_dimension(&self.z, ValidationError::InvalidTileZ)?,
            x: parse_dimension(&self.x, ValidationError::InvalidTileX)?,
            y: parse_dimension(&self.y, ValidationError::InvalidTileY)?,
        })
    }
}

impl Validate for VectorTileParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("datasetName", &self.dataset_name),
            ("z", &self.z),
            ("x", &self.x),
            ("y", &self.y),
        ]
    }
}

/// Markers and an optional path drawn over a static map image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOverlay {
    pub markers: Vec<String>,
    pub path: String,
}

impl MapOverlay {
    pub fn new(markers: Vec<String>, path: impl Into<String>) -> Self {
        Self {
            markers,
            path: path.into(),
        }
    }

    /// Query pairs appended to the image URL. Markers are joined into a single
    /// `marker` value; empty entries are skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        let markers: Vec<&str> = self
            .markers
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect();
        if !markers.is_empty() {
            pairs.push(("marker", markers.join(",")));
        }
        if !self.path.is_empty() {
            pairs.push(("path", self.path.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapCenterParams {
    pub style_name: String,
    pub longitude: String,
    pub latitude: String,
    pub zoom_level: String,
    pub width: String,
    pub height: String,
    pub format: String,
    #[serde(default)]
    pub overlay: MapOverlay,
}

impl StaticMapCenterParams {
    /// Longitude, latitude, zoom, width, height.
    pub fn parse(&self) -> Result<CenterView, ValidationError> {
        let longitude = parse_coordinate(&self.longitude, ValidationError::InvalidLongitude)?;
        let latitude = parse_coordinate(&self.latitude, ValidationError::InvalidLatitude)?;
        let zoom = parse_dimension(&self.zoom_level, ValidationError::InvalidZoomLevel)?;
        let size = ImageSize::parse(&self.width, &self.height)?;
        Ok(CenterView {
            longitude,
            latitude,
            zoom,
            size,
        })
    }
}

impl Validate for StaticMapCenterParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("stylename", &self.style_name),
            ("longitude", &self.longitude),
            ("latitude", &self.latitude),
            ("zoomlevel", &self.zoom_level),
            ("width", &self.width),
            ("height", &self.height),
            ("format", &self.format),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapBoundedParams {
    pub style_name: String,
    pub min_x: String,
    pub min_y: String,
    pub max_x: String,
    pub max_y: String,
    pub width: String,
    pub height: String,
    pub format: String,
    #[serde(default)]
    pub overlay: MapOverlay,
}

impl StaticMapBoundedParams {
    /// Min x, min y, max x, max y, width, height.
    pub fn parse(&self) -> Result<BoundedView, ValidationError> {
        let min_x = parse_coordinate(&self.min_x, ValidationError::InvalidMinX)?;
        let min_y = parse_coordinate(&self.min_y, ValidationError::InvalidMinY)?;
        let max_x = parse_coordinate(&self.max_x, ValidationError::InvalidMaxX)?;
        let max_y = parse_coordinate(&self.max_y, ValidationError::InvalidMaxY)?;
        let size = ImageSize::parse(&self.width, &self.height)?;
        Ok(BoundedView {
            min_x,
            min_y,
            max_x,
            max_y,
            size,
        })
    }
}

impl Validate for StaticMapBoundedParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("stylename", &self.style_name),
            ("minx", &self.min_x),
            ("miny", &self.min_y),
            ("maxx", &self.max_x),
            ("maxy", &self.max_y),
            ("width", &self.width),
            ("height", &self.height),
            ("format", &self.format),
        ]
    }
}

/// Auto-fitted static image. `path` is optional here; sessions that need a
/// fitted view check it with [`StaticMapParams::validate_with_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapParams {
    pub style_name: String,
    pub width: String,
    pub height: String,
    pub format: String,
    #[serde(default)]
    pub overlay: MapOverlay,
}

impl StaticMapParams {
    pub fn parse(&self) -> Result<ImageSize, ValidationError> {
        ImageSize::parse(&self.width, &self.height)
    }

    /// Required fields plus the overlay `path`.
    pub fn validate_with_path(&self) -> Result<(), ValidationError> {
        let mut fields = self.required_fields();
        fields.push(("path", self.overlay.path.as_str()));
        check_required(&fields)
    }
}

impl Validate for StaticMapParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("stylename", &self.style_name),
            ("width", &self.width),
            ("height", &self.height),
            ("format", &self.format),
        ]
    }
}

// ── Parsed views ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn parse(width: &str, height: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            width: parse_dimension(width, ValidationError::InvalidImageWidth)?,
            height: parse_dimension(height, ValidationError::InvalidImageHeight)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: u32,
    pub size: ImageSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedView {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub size: ImageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoordinate {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

// ── Responses ────────────────────────────────────────────────────────

/// TileJSON document describing a vector dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayOfData {
    pub attribution: String,
    pub bounds: Vec<f64>,
    pub center: Vec<f64>,
    pub compression: String,
    pub data_version: String,
    pub description: String,
    pub format: String,
    pub id: String,
    pub maxzoom: u32,
    pub minzoom: u32,
    pub mbtiles_version: String,
    pub name: String,
    pub planetiler: Value,
    pub tilejson: String,
    pub tiles: Vec<String>,
    #[serde(rename = "type")]
    pub dataset_type: String,
    pub vector_layers: Vec<VectorLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorLayer {
    pub id: String,
    pub fields: BTreeMap<String, String>,
    pub minzoom: u32,
    pub maxzoom: u32,
}

/// Entry of the style catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub version: u32,
    pub name: String,
    pub id: String,
    pub url: String,
}

/// Mapbox GL style document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDetails {
    pub id: String,
    pub version: u32,
    pub name: String,
    pub metadata: Value,
    pub sources: BTreeMap<String, StyleSource>,
    pub sprite: String,
    pub glyphs: String,
    pub layers: Vec<StyleLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub source: String,
    #[serde(rename = "source-layer")]
    pub source_layer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    pub filter: Value,
    pub layout: Value,
    pub paint: Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn center(longitude: &str, latitude: &str, zoom: &str, width: &str, height: &str) -> StaticMapCenterParams {
        StaticMapCenterParams {
            style_name: "default-light-standard".into(),
            longitude: longitude.into(),
            latitude: latitude.into(),
            zoom_level: zoom.into(),
            width: width.into(),
            height: height.into(),
            format: "png".into(),
            overlay: MapOverlay::default(),
        }
    }

    #[test]
    fn test_center_parse_checks_fields_in_order() {
        let cases = [
            (center("x", "x", "x", "x", "x"), ValidationError::InvalidLongitude),
            (center("77.6", "x", "x", "x", "x"), ValidationError::InvalidLatitude),
            (center("77.6", "12.9", "x", "x", "x"), ValidationError::InvalidZoomLevel),
            (center("77.6", "12.9", "15", "x", "x"), ValidationError::InvalidImageWidth),
            (center("77.6", "12.9", "15", "800", "x"), ValidationError::InvalidImageHeight),
        ];

        for (params, expected) in cases {
            assert_eq!(params.parse().unwrap_err(), expected);
        }

        let view = center("77.6", "12.9", "15", "800", "600").parse().unwrap();
        assert_eq!(view.zoom, 15);
        assert_eq!(view.size, ImageSize { width: 800, height: 600 });
    }

    #[test]
    fn test_bounded_parse_checks_fields_in_order() {
        let mut params = StaticMapBoundedParams {
            style_name: "default-light-standard".into(),
            min_x: "77.5".into(),
            min_y: "12.9".into(),
            max_x: "77.7".into(),
            max_y: "bad".into(),
            width: "bad".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: MapOverlay::default(),
        };
        assert_eq!(params.parse().unwrap_err(), ValidationError::InvalidMaxY);

        params.max_y = "13.1".into();
        assert_eq!(params.parse().unwrap_err(), ValidationError::InvalidImageWidth);

        params.width = "800".into();
        let view = params.parse().unwrap();
        assert_eq!(view.max_y, 13.1);
    }

    #[test]
    fn test_static_map_path_is_optional_unless_requested() {
        let mut params = StaticMapParams {
            style_name: "default-light-standard".into(),
            width: "800".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: MapOverlay::default(),
        };
        assert!(params.validate().is_ok());

        let err = params.validate_with_path().unwrap_err();
        assert_eq!(err.missing(), &["path"]);
        assert_eq!(
            err.to_string(),
            "Missing required query parameters: 'stylename' and/or 'width' and/or 'height' and/or 'format' and/or 'path'"
        );

        params.overlay.path = "77.5,12.9|77.7,13.1".into();
        assert!(params.validate_with_path().is_ok());
    }

    #[test]
    fn test_overlay_joins_markers_and_skips_empty() {
        let overlay = MapOverlay::new(
            vec!["77.61,12.93|red|scale:0.9".into(), String::new(), "77.62,12.94".into()],
            "",
        );

        assert_eq!(
            overlay.query_pairs(),
            vec![("marker", "77.61,12.93|red|scale:0.9,77.62,12.94".to_string())]
        );
        assert!(MapOverlay::default().query_pairs().is_empty());
    }

    #[test]
    fn test_vector_tile_parse() {
        let params = VectorTileParams::new("planet", "14", "-1", "7");
        assert_eq!(params.parse().unwrap_err(), ValidationError::InvalidTileX);

        let params = VectorTileParams::new("planet", "14", "11718", "7559");
        assert_eq!(
            params.parse().unwrap(),
            TileCoordinate { z: 14, x: 11718, y: 7559 }
        );
    }

    #[test]
    fn test_style_details_deserialization() {
        let style: StyleDetails = serde_json::from_value(json!({
            "id": "positron",
            "version": 8,
            "name": "Light",
            "sources": {
                "openmaptiles": {
                    "type": "vector",
                    "url": "https://api.olamaps.io/tiles/vector/v1/data/planet.json"
                }
            },
            "layers": [{
                "id": "water",
                "type": "fill",
                "source": "openmaptiles",
                "source-layer": "water",
                "filter": ["all", ["==", "$type", "Polygon"]],
                "paint": {"fill-color": "rgb(194, 200, 202)"}
            }]
        }))
        .unwrap();

        assert_eq!(style.sources["openmaptiles"].source_type, "vector");
        assert_eq!(style.layers[0].source_layer, "water");
        assert_eq!(style.layers[0].layout, Value::Null);
    }
}
