//! In-memory [`Dispatcher`] for tests.
//!
//! Routes are matched by URL substring in registration order; the first match
//! wins. Every request is recorded so tests can assert on URLs and headers.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::{
    dispatch::{Dispatcher, ProviderRequest, RawResponse},
    error::ClientResult,
};

/// One PNG signature worth of bytes; enough for callers that only relay them.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Debug, Clone)]
struct Route {
    pattern: String,
    response: RawResponse,
}

#[derive(Debug, Clone, Default)]
pub struct MockDispatcher {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher answering every provider operation with a canned success body.
    pub fn with_fixtures() -> Self {
        let mock = Self::new();
        mock.route_json("routing/v1/directions", 200, fixtures::DIRECTIONS);
        mock.route_json("routing/v1/distanceMatrix", 200, fixtures::DISTANCE_MATRIX);
        mock.route_json("routing/v1/snapToRoad", 200, fixtures::SNAP_TO_ROAD);
        mock.route_json("routing/v1/nearestRoads", 200, fixtures::NEAREST_ROADS);
        mock.route_json("places/v1/autocomplete", 200, fixtures::AUTOCOMPLETE);
        mock.route_json("places/v1/geocode", 200, fixtures::GEOCODE);
        mock.route_json("places/v1/reverse-geocode", 200, fixtures::REVERSE_GEOCODE);
        mock.route_json("places/v1/details", 200, fixtures::PLACE_DETAIL);
        mock.route_json("places/v1/nearbysearch", 200, fixtures::NEARBY_SEARCH);
        mock.route_json("places/v1/textsearch", 200, fixtures::TEXT_SEARCH);
        mock.route_bytes(".pbf", 200, "application/x-protobuf", fixtures::VECTOR_TILE);
        mock.route_json("tiles/vector/v1/data", 200, fixtures::ARRAY_OF_DATA);
        mock.route_json("tiles/vector/v1/styles.json", 200, fixtures::MAP_STYLE);
        mock.route_json("style.json", 200, fixtures::STYLE_DETAILS);
        mock.route_bytes("/static/", 200, "image/png", PNG_BYTES);
        mock
    }

    pub fn route(&self, pattern: impl Into<String>, response: RawResponse) -> &Self {
        self.routes.lock().push(Route {
            pattern: pattern.into(),
            response,
        });
        self
    }

    pub fn route_json(&self, pattern: impl Into<String>, status: u16, body: &str) -> &Self {
        self.route(
            pattern,
            RawResponse {
                status,
                content_type: Some("application/json".to_string()),
                body: Bytes::copy_from_slice(body.as_bytes()),
            },
        )
    }

    pub fn route_bytes(
        &self,
        pattern: impl Into<String>,
        status: u16,
        content_type: &str,
        body: &[u8],
    ) -> &Self {
        self.route(
            pattern,
            RawResponse {
                status,
                content_type: Some(content_type.to_string()),
                body: Bytes::copy_from_slice(body),
            },
        )
    }

    /// Registers a route ahead of all existing ones.
    pub fn override_route(&self, pattern: impl Into<String>, response: RawResponse) -> &Self {
        self.routes.lock().insert(
            0,
            Route {
                pattern: pattern.into(),
                response,
            },
        );
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn send(&self, request: ProviderRequest) -> ClientResult<RawResponse> {
        let matched = self
            .routes
            .lock()
            .iter()
            .find(|route| request.url.contains(&route.pattern))
            .map(|route| route.response.clone());
        self.requests.lock().push(request);

        Ok(matched.unwrap_or_else(|| RawResponse {
            status: 400,
            content_type: Some("text/plain".to_string()),
            body: Bytes::from_static(b"Invalid request"),
        }))
    }
}

/// Canned provider bodies used by [`MockDispatcher::with_fixtures`].
pub mod fixtures {
    pub const DIRECTIONS: &str = r#"{
        "status": "OK",
        "source_from": "Ola Maps",
        "geocoded_waypoints": [
            {"geocoder_status": "OK", "place_id": "ola-platform:5000039498427", "types": ["locality"]}
        ],
        "routes": [{
            "bounds": {},
            "copyrights": "OlaMaps",
            "summary": "Ring Road",
            "overview_polyline": "qfmnAmzyxM",
            "travel_advisory": "",
            "warnings": [],
            "waypoint_order": [],
            "legs": [{
                "distance": 9847,
                "readable_distance": "9.85",
                "duration": 1629,
                "readable_duration": "27 min",
                "start_address": "Koramangala, Bengaluru",
                "start_location": {"lat": 12.93129, "lng": 77.61685},
                "end_address": "Indiranagar, Bengaluru",
                "end_location": {"lat": 12.97159, "lng": 77.64115},
                "steps": [{
                    "distance": 120,
                    "readable_distance": "0.12",
                    "duration": 22,
                    "readable_duration": "0 min",
                    "start_location": {"lat": 12.93129, "lng": 77.61685},
                    "end_location": {"lat": 12.93201, "lng": 77.61703},
                    "instructions": "Head north on 80 Feet Road",
                    "maneuver": "depart",
                    "bearing_before": 0,
                    "bearing_after": 12
                }]
            }]
        }]
    }"#;

    pub const DISTANCE_MATRIX: &str = r#"{
        "status": "SUCCESS",
        "rows": [{
            "elements": [
                {"duration": 1629, "distance": 9847, "polyline": "qfmnAmzyxM", "status": "OK"},
                {"duration": 2110, "distance": 14202, "polyline": "ofmnAkzyxM", "status": "OK"}
            ]
        }]
    }"#;

    pub const SNAP_TO_ROAD: &str = r#"{
        "status": "SUCCESS",
        "snapped_points": [
            {"location": {"lat": 12.99913, "lng": 77.67079}, "original_index": 0, "snapped_type": "snapped"},
            {"location": {"lat": 12.99238, "lng": 77.6589}, "original_index": 1, "snapped_type": "snapped"}
        ]
    }"#;

    pub const NEAREST_ROADS: &str = r#"{
        "status": "SUCCESS",
        "results": [{
            "lat": 12.97711937255269,
            "lng": 77.57183856264156,
            "distance": 34.15771496364373,
            "originalIndex": 0,
            "status": "SUCCESS"
        }]
    }"#;

    pub const AUTOCOMPLETE: &str = r#"{
        "status": "ok",
        "error_message": "",
        "info_messages": [],
        "predictions": [{
            "description": "Kempegowda International Airport Bengaluru, KIAL Road, Devanahalli",
            "place_id": "ola-platform:a79ed32419962a11a588ea92b83ca78e",
            "reference": "ola-platform:a79ed32419962a11a588ea92b83ca78e",
            "types": ["establishment", "airport"],
            "layer": ["venue"],
            "matched_substrings": [{"offset": 0, "length": 10}],
            "terms": [{"offset": 0, "value": "Kempegowda International Airport Bengaluru"}],
            "structured_formatting": {
                "main_text": "Kempegowda International Airport Bengaluru",
                "main_text_matched_substrings": [{"offset": 0, "length": 10}],
                "secondary_text": "KIAL Road, Devanahalli, Bengaluru, Karnataka"
            },
            "geometry": {"location": {"lat": 13.20015, "lng": 77.70976}},
            "distance_meters": 33820
        }]
    }"#;

    pub const GEOCODE: &str = r#"{
        "status": "ok",
        "geocodingResults": [{
            "formatted_address": "Mumbai, Maharashtra, India",
            "types": ["locality"],
            "name": "Mumbai",
            "place_id": "ola-platform:5000039498427",
            "layer": ["locality"],
            "geometry": {
                "location": {"lat": 19.07283, "lng": 72.88261},
                "location_type": "APPROXIMATE",
                "viewport": {
                    "northeast": {"lat": 19.2705, "lng": 72.9865},
                    "southwest": {"lat": 18.8928, "lng": 72.7758}
                }
            },
            "address_components": [
                {"types": ["locality"], "short_name": "Mumbai", "long_name": "Mumbai"},
                {"types": ["country"], "short_name": "IN", "long_name": "India"}
            ]
        }]
    }"#;

    pub const REVERSE_GEOCODE: &str = r#"{
        "status": "ok",
        "error_message": "",
        "info_messages": [],
        "plus_code": {"compound_code": "", "global_code": ""},
        "results": [{
            "formatted_address": "Ola Campus, Koramangala, Bengaluru, Karnataka, 560034, India",
            "types": ["establishment"],
            "name": "Ola Campus",
            "place_id": "ola-platform:7c5ae7f1a5b2b3a1b9a5b7c0e3c5f3d2",
            "layer": ["venue"],
            "geometry": {
                "location": {"lat": 12.93129, "lng": 77.61685},
                "location_type": "ROOFTOP",
                "viewport": {
                    "northeast": {"lat": 12.93139, "lng": 77.61695},
                    "southwest": {"lat": 12.93119, "lng": 77.61675}
                }
            },
            "address_components": [
                {"types": [["sublocality"], "political"], "short_name": "Koramangala", "long_name": "Koramangala"},
                {"types": [["country"]], "short_name": "India", "long_name": "India"}
            ]
        }]
    }"#;

    pub const PLACE_DETAIL: &str = r#"{
        "status": "ok",
        "error_message": "",
        "info_messages": [],
        "html_attributions": [],
        "result": {
            "place_id": "ola-platform:a79ed32419962a11a588ea92b83ca78e",
            "reference": "ola-platform:a79ed32419962a11a588ea92b83ca78e",
            "name": "Kempegowda International Airport Bengaluru",
            "formatted_address": "KIAL Road, Devanahalli, Bengaluru, Karnataka 560300, India",
            "business_status": "OPERATIONAL",
            "formatted_phone_number": "080 6678 2425",
            "international_phone_number": "+91 80 6678 2425",
            "geometry": {"location": {"lat": 13.20015, "lng": 77.70976}},
            "opening_hours": {
                "open_now": true,
                "periods": [{"open": {"day": 0, "time": "0000"}, "close": {"day": 6, "time": "2359"}}],
                "weekday_text": ["Monday: Open 24 hours"]
            },
            "rating": 4.3,
            "user_ratings_total": 104521,
            "utc_offset": 330,
            "price_level": "NA",
            "types": ["airport"],
            "layer": ["venue"],
            "website": "https://www.bengaluruairport.com",
            "reviews": [{
                "author_name": "A traveller",
                "language": "en",
                "rating": 5,
                "relative_time_description": "a month ago",
                "text": "Clean and well organised.",
                "time": 1718000000
            }]
        }
    }"#;

    pub const NEARBY_SEARCH: &str = r#"{
        "status": "ok",
        "error_message": "",
        "info_messages": [],
        "predictions": [{
            "description": "Third Wave Coffee, 80 Feet Road, Koramangala",
            "place_id": "ola-platform:4c1b2a0e8f4d4a5b9c6d7e8f9a0b1c2d",
            "reference": "ola-platform:4c1b2a0e8f4d4a5b9c6d7e8f9a0b1c2d",
            "types": ["cafe", "food"],
            "layer": ["venue"],
            "distance_meters": 412
        }]
    }"#;

    pub const TEXT_SEARCH: &str = r#"{
        "status": "ok",
        "error_message": "",
        "info_messages": [],
        "predictions": [{
            "formatted_address": "100 Feet Road, Indiranagar, Bengaluru",
            "geometry": {"location": {"lat": 12.97159, "lng": 77.64115}},
            "place_id": "ola-platform:9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d",
            "name": "Cafes in Indiranagar",
            "types": ["cafe"]
        }]
    }"#;

    pub const ARRAY_OF_DATA: &str = r#"{
        "attribution": "basename:planet.mbtiles",
        "bounds": [-180, -85.05113, 180, 85.05113],
        "center": [0, 0, 0],
        "compression": "gzip",
        "data_version": "v2.5.8",
        "description": "",
        "format": "pbf",
        "id": "planet",
        "maxzoom": 14,
        "minzoom": 0,
        "mbtiles_version": "v2.5.8.0",
        "name": "Tiles",
        "planetiler": {"version": "0.7-SNAPSHOT"},
        "tilejson": "2.0.0",
        "tiles": ["https://api.olamaps.io/tiles/vector/v1/data/planet/{z}/{x}/{y}.pbf"],
        "type": "baselayer",
        "vector_layers": [
            {"id": "aeroway", "fields": {"class": "String", "ref": "String"}, "minzoom": 10, "maxzoom": 14}
        ]
    }"#;

    pub const MAP_STYLE: &str = r#"[
        {
            "version": 8,
            "name": "Light",
            "id": "light",
            "url": "https://api.olamaps.io/tiles/vector/v1/styles/default-light-standard/style.json"
        }
    ]"#;

    pub const STYLE_DETAILS: &str = r#"{
        "id": "positron",
        "version": 8,
        "name": "Light",
        "sources": {
            "openmaptiles": {"type": "vector", "url": "https://api.olamaps.io/tiles/vector/v1/data/planet.json"}
        },
        "glyphs": "https://api.olamaps.io/tiles/vector/v1/fonts/{fontstack}/{range}.pbf",
        "layers": [{
            "id": "water",
            "type": "fill",
            "source": "openmaptiles",
            "source-layer": "water",
            "filter": ["all", ["==", "$type", "Polygon"], ["!=", "brunnel", "tunnel"]],
            "layout": {"visibility": "visible"},
            "paint": {"fill-antialias": true, "fill-color": "rgb(194, 200, 202)"}
        }]
    }"#;

    pub const VECTOR_TILE: &[u8] = &[0x1a, 0x0b, 0x0a, 0x05, b'w', b'a', b't', b'e', b'r', 0x78, 0x02];
}
