//! Places API: autocomplete, geocoding, place details and search.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    common::{AddressComponent, Geometry, MatchedSubstring, PlusCode, StructuredFormatting, Term},
    validated::Validate,
};

// ── Parameters ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteParams {
    pub input: String,
}

impl AutocompleteParams {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl Validate for AutocompleteParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("input", &self.input)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeParams {
    pub address: String,
    #[serde(default)]
    pub bounds: String,
    #[serde(default)]
    pub language: String,
}

impl GeocodeParams {
    pub fn new(
        address: impl Into<String>,
        bounds: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            bounds: bounds.into(),
            language: language.into(),
        }
    }
}

impl Validate for GeocodeParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("address", &self.address)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseGeocodeParams {
    /// `lat,lng`
    pub latlng: String,
}

impl ReverseGeocodeParams {
    pub fn new(latlng: impl Into<String>) -> Self {
        Self {
            latlng: latlng.into(),
        }
    }
}

impl Validate for ReverseGeocodeParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("latlng", &self.latlng)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetailParams {
    pub place_id: String,
}

impl PlaceDetailParams {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
        }
    }
}

impl Validate for PlaceDetailParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("placeId", &self.place_id)]
    }
}

/// Nearby search. Only `layers` and `location` are required; the rest are
/// passed through verbatim (empty strings included).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbySearchParams {
    pub layers: String,
    pub location: String,
    pub types: String,
    pub radius: String,
    pub strictbounds: String,
    #[serde(rename = "withCentroid")]
    pub with_centroid: String,
    pub limit: String,
}

impl NearbySearchParams {
    pub fn new(layers: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            layers: layers.into(),
            location: location.into(),
            ..Default::default()
        }
    }
}

impl Validate for NearbySearchParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("layers", &self.layers), ("location", &self.location)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSearchParams {
    pub input: String,
    pub location: String,
    pub radius: String,
    pub types: String,
    pub size: String,
}

impl TextSearchParams {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }
}

impl Validate for TextSearchParams {
    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("input", &self.input)]
    }
}

// ── Responses ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autocomplete {
    pub predictions: Vec<Prediction>,
    pub info_messages: Vec<Value>,
    pub error_message: String,
    pub status: String,
}

/// Prediction returned by autocomplete and nearby search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
    pub reference: String,
    pub types: Vec<String>,
    pub layer: Vec<String>,
    pub matched_substrings: Vec<MatchedSubstring>,
    pub terms: Vec<Term>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_formatting: Option<StructuredFormatting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geocode {
    pub status: String,
    #[serde(rename = "geocodingResults")]
    pub geocoding_results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseGeocode {
    pub error_message: String,
    pub info_messages: Vec<Value>,
    pub results: Vec<GeocodeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub types: Vec<String>,
    pub name: String,
    pub geometry: Geometry,
    pub address_components: Vec<AddressComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    pub place_id: String,
    pub layer: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDetail {
    pub html_attributions: Vec<Value>,
    pub result: PlaceDetailResult,
    pub info_messages: Vec<Value>,
    pub error_message: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDetailResult {
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
    pub reference: String,
    pub business_status: String,
    pub formatted_phone_number: String,
    pub international_phone_number: String,
    pub icon: String,
    pub icon_background_color: String,
    pub icon_mask_base_uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    pub rating: f64,
    pub reviews: Vec<Review>,
    pub types: Vec<String>,
    pub layer: Vec<String>,
    pub url: String,
    pub user_ratings_total: u64,
    pub utc_offset: i64,
    pub vicinity: String,
    pub website: String,
    /// `"NA"` or a number depending on the place
    pub price_level: Value,
    pub photos: Vec<Value>,
    pub adr_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub open_now: bool,
    pub periods: Vec<OpeningPeriod>,
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningPeriod {
    pub open: DayTime,
    pub close: DayTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayTime {
    pub day: u8,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub author_name: String,
    pub author_url: String,
    pub language: String,
    pub profile_photo_url: String,
    pub rating: f64,
    pub relative_time_description: String,
    pub text: String,
    pub time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbySearch {
    pub predictions: Vec<Prediction>,
    pub info_messages: Vec<Value>,
    pub error_message: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSearch {
    pub predictions: Vec<TextSearchResult>,
    pub info_messages: Vec<Value>,
    pub error_message: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSearchResult {
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
    pub name: String,
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_geocode_only_requires_address() {
        assert!(GeocodeParams::new("Mumbai", "", "").validate().is_ok());

        let err = GeocodeParams::new("", "18.9,72.8|19.2,73.0", "en")
            .validate()
            .unwrap_err();
        assert_eq!(err.missing(), &["address"]);
        assert_eq!(
            err.to_string(),
            "Missing required query parameters: 'address'"
        );
    }

    #[test]
    fn test_place_detail_reports_camel_case_name() {
        let err = PlaceDetailParams::new("").validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required query parameters: 'placeId'");
    }

    #[test]
    fn test_nearby_search_requires_layers_and_location() {
        let err = NearbySearchParams::new("venue", "").validate().unwrap_err();
        assert_eq!(err.missing(), &["location"]);
        assert_eq!(
            err.to_string(),
            "Missing required query parameters: 'layers' and/or 'location'"
        );
    }

    #[test]
    fn test_nearby_search_params_from_query_names() {
        let params: NearbySearchParams = serde_json::from_value(json!({
            "layers": "venue",
            "location": "12.93,77.61",
            "withCentroid": "false"
        }))
        .unwrap();

        assert_eq!(params.with_centroid, "false");
        assert!(params.limit.is_empty());
    }

    #[test]
    fn test_place_detail_price_level_accepts_string_or_number() {
        let detail: PlaceDetail = serde_json::from_value(json!({
            "result": {"name": "Ola Electric", "price_level": "NA"},
            "status": "ok"
        }))
        .unwrap();
        assert_eq!(detail.result.price_level, json!("NA"));

        let detail: PlaceDetail =
            serde_json::from_value(json!({"result": {"price_level": 2}})).unwrap();
        assert_eq!(detail.result.price_level, json!(2));
    }
}
