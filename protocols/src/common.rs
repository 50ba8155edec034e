//! Shapes shared by several provider responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// Location of a place; viewport and location type are absent on predictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlusCode {
    pub compound_code: String,
    pub global_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    /// Reverse geocoding nests each type in its own array; both forms are flattened.
    #[serde(deserialize_with = "flatten_types")]
    pub types: Vec<String>,
    pub short_name: String,
    pub long_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchedSubstring {
    pub offset: u32,
    pub length: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Term {
    pub offset: u32,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub main_text_matched_substrings: Vec<MatchedSubstring>,
    pub secondary_text: String,
    pub secondary_text_matched_substrings: Vec<MatchedSubstring>,
}

fn flatten_types<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn collect(value: Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) => out.push(s),
            Value::Array(items) => {
                for item in items {
                    collect(item, out);
                }
            }
            _ => {}
        }
    }

    let raw = Value::deserialize(deserializer)?;
    let mut types = Vec::new();
    collect(raw, &mut types);
    Ok(types)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_address_component_flattens_nested_types() {
        let component: AddressComponent = serde_json::from_value(json!({
            "types": [["country"], "political"],
            "short_name": "India",
            "long_name": "India"
        }))
        .unwrap();

        assert_eq!(component.types, vec!["country", "political"]);
        assert_eq!(component.long_name, "India");
    }

    #[test]
    fn test_geometry_without_viewport() {
        let geometry: Geometry =
            serde_json::from_value(json!({"location": {"lat": 13.05158, "lng": 77.61194}}))
                .unwrap();

        assert!(geometry.viewport.is_none());
        assert_eq!(geometry.location.lat, 13.05158);
    }
}
