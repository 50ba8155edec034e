//! Routing API: directions, distance matrix, snap-to-road and nearest roads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    common::LatLng,
    validated::{Normalizable, Validate},
};

/// Radius (metres) used for nearest-roads lookups when the caller gives none.
pub const DEFAULT_NEAREST_ROADS_RADIUS: &str = "500";

// ── Parameters ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsParams {
    /// `lat,lng` of the start point
    pub origin: String,
    /// `lat,lng` of the end point
    pub destination: String,
}

impl DirectionsParams {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

impl Validate for DirectionsParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("origin", &self.origin), ("destination", &self.destination)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrixParams {
    /// Pipe separated `lat,lng` origins
    pub origins: String,
    /// Pipe separated `lat,lng` destinations
    pub destinations: String,
}

impl DistanceMatrixParams {
    pub fn new(origins: impl Into<String>, destinations: impl Into<String>) -> Self {
        Self {
            origins: origins.into(),
            destinations: destinations.into(),
        }
    }
}

impl Validate for DistanceMatrixParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("origins", &self.origins),
            ("destinations", &self.destinations),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapToRoadParams {
    pub points: String,
    #[serde(default, rename = "enhancePath")]
    pub enhance_path: String,
}

impl SnapToRoadParams {
    pub fn new(points: impl Into<String>, enhance_path: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            enhance_path: enhance_path.into(),
        }
    }
}

impl Validate for SnapToRoadParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("points", &self.points)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestRoadsParams {
    pub points: String,
    #[serde(default)]
    pub radius: String,
}

impl NearestRoadsParams {
    pub fn new(points: impl Into<String>, radius: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            radius: radius.into(),
        }
    }
}

impl Validate for NearestRoadsParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("points", &self.points)]
    }
}

impl Normalizable for NearestRoadsParams {
    fn normalize(&mut self) {
        if self.radius.is_empty() {
            self.radius = DEFAULT_NEAREST_ROADS_RADIUS.to_string();
        }
    }
}

// ── Responses ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directions {
    pub geocoded_waypoints: Vec<GeocodedWaypoint>,
    pub routes: Vec<Route>,
    pub status: String,
    pub source_from: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodedWaypoint {
    pub geocoder_status: String,
    pub place_id: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    /// Documented as an object but returned as a string by some deployments
    pub bounds: Value,
    pub copyrights: String,
    pub legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_polyline: Option<String>,
    pub travel_advisory: String,
    pub summary: String,
    pub warnings: Vec<Value>,
    pub waypoint_order: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leg {
    pub distance: u64,
    pub readable_distance: String,
    pub duration: u64,
    pub readable_duration: String,
    pub start_address: String,
    pub start_location: LatLng,
    pub end_address: String,
    pub end_location: LatLng,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub distance: u64,
    pub readable_distance: String,
    pub duration: u64,
    pub readable_duration: String,
    pub start_location: LatLng,
    pub end_location: LatLng,
    pub instructions: String,
    pub maneuver: String,
    pub bearing_before: u32,
    pub bearing_after: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceMatrix {
    pub rows: Vec<MatrixRow>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixElement {
    pub duration: u64,
    pub distance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapToRoad {
    pub status: String,
    pub snapped_points: Vec<SnappedPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnappedPoint {
    pub location: LatLng,
    pub original_index: u32,
    pub snapped_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestRoads {
    pub status: String,
    pub results: Vec<NearestRoad>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestRoad {
    pub lat: f64,
    pub lng: f64,
    pub distance: f64,
    #[serde(rename = "originalIndex")]
    pub original_index: u32,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validated::ValidationError;

    #[test]
    fn test_directions_requires_both_endpoints() {
        let err = DirectionsParams::new("", "").validate().unwrap_err();
        assert_eq!(err.missing(), &["origin", "destination"]);

        let err = DirectionsParams::new("12.9,77.6", "").validate().unwrap_err();
        assert!(matches!(err, ValidationError::MissingParameters { .. }));
        assert_eq!(err.missing(), &["destination"]);
    }

    #[test]
    fn test_nearest_roads_normalize_fills_default_radius() {
        let mut params = NearestRoadsParams::new("12.97,77.57", "");
        params.normalize();
        assert_eq!(params.radius, DEFAULT_NEAREST_ROADS_RADIUS);

        let mut params = NearestRoadsParams::new("12.97,77.57", "66.8");
        params.normalize();
        assert_eq!(params.radius, "66.8");
    }

    #[test]
    fn test_nearest_roads_deserialization() {
        let roads: NearestRoads = serde_json::from_value(json!({
            "status": "SUCCESS",
            "results": [{
                "lat": 12.97711937255269,
                "lng": 77.57183856264156,
                "distance": 34.15771496364373,
                "originalIndex": 0,
                "status": "SUCCESS"
            }]
        }))
        .unwrap();

        assert_eq!(roads.results.len(), 1);
        assert_eq!(roads.results[0].original_index, 0);
        assert!(roads.results[0].distance > 34.0);
    }

    #[test]
    fn test_route_bounds_accepts_string() {
        let route: Route = serde_json::from_value(json!({
            "bounds": "string",
            "legs": [],
            "waypoint_order": [0, 3, 2, 1]
        }))
        .unwrap();

        assert_eq!(route.bounds, json!("string"));
        assert_eq!(route.waypoint_order, vec![0, 3, 2, 1]);
    }
}
