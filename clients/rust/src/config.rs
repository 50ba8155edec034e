//! Provider endpoint templates and client configuration.
//!
//! Templates use positional placeholders: `%s` and `%v` take any value, `%f`
//! renders a float with six decimals and `%d` an integer. `%%` is a literal
//! percent sign.

use std::{fmt, time::Duration};

use crate::error::{ClientError, ClientResult};

/// A value substituted into an endpoint template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateArg<'a> {
    Str(&'a str),
    Float(f64),
    Int(u32),
}

impl fmt::Display for TemplateArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArg::Str(s) => f.write_str(s),
            TemplateArg::Float(v) => write!(f, "{}", v),
            TemplateArg::Int(v) => write!(f, "{}", v),
        }
    }
}

/// Counts substitution points in `template`.
pub fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.next() {
                Some('s' | 'v' | 'f' | 'd') => count += 1,
                _ => {}
            }
        }
    }
    count
}

/// Substitutes `args` into `template` in order.
pub fn render(template: &str, args: &[TemplateArg<'_>]) -> ClientResult<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let verb = match chars.next() {
            Some(v @ ('s' | 'v' | 'f' | 'd')) => v,
            Some('%') => {
                out.push('%');
                continue;
            }
            Some(other) => {
                out.push('%');
                out.push(other);
                continue;
            }
            None => {
                out.push('%');
                break;
            }
        };
        let arg = args.next().ok_or_else(|| {
            ClientError::Config(format!("template '{}' has more placeholders than values", template))
        })?;
        match (verb, arg) {
            ('f', TemplateArg::Float(v)) => out.push_str(&format!("{:.6}", v)),
            ('d', TemplateArg::Int(v)) => out.push_str(&v.to_string()),
            ('s' | 'v', arg) => out.push_str(&arg.to_string()),
            (verb, arg) => {
                return Err(ClientError::Config(format!(
                    "template '{}' expects %{} but got {:?}",
                    template, verb, arg
                )))
            }
        }
    }

    if args.next().is_some() {
        return Err(ClientError::Config(format!(
            "template '{}' has fewer placeholders than values",
            template
        )));
    }
    Ok(out)
}

/// Escapes a value for use inside a URL query string or path segment.
pub fn query_escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

macro_rules! endpoints {
    ($($field:ident: $env:literal, $placeholders:literal, $default:literal;)*) => {
        /// Provider URL templates. Immutable once built; share it behind an `Arc`.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Endpoints {
            $(pub $field: String,)*
        }

        impl Default for Endpoints {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)*
                }
            }
        }

        impl Endpoints {
            /// `(env var, template, expected placeholders)` for every endpoint.
            fn table(&self) -> Vec<(&'static str, &str, usize)> {
                vec![$(($env, self.$field.as_str(), $placeholders),)*]
            }

            /// Defaults overridden by any non-empty value `lookup` returns for
            /// an endpoint's environment variable name.
            pub fn from_lookup<F>(lookup: F) -> Self
            where
                F: Fn(&str) -> Option<String>,
            {
                let mut endpoints = Self::default();
                $(
                    if let Some(value) = lookup($env).filter(|v| !v.trim().is_empty()) {
                        endpoints.$field = value.trim().to_string();
                    }
                )*
                endpoints
            }
        }
    };
}

endpoints! {
    token_url: "TOKEN_URL", 0,
        "https://account.olamaps.io/realms/olamaps/protocol/openid-connect/token";
    directions: "DIRECTIONS_URL", 2,
        "https://api.olamaps.io/routing/v1/directions?origin=%s&destination=%s";
    place_autocomplete: "PLACE_AUTO_COMPLETE_URL", 1,
        "https://api.olamaps.io/places/v1/autocomplete?input=%s";
    geocode: "GEOCODE_URL", 3,
        "https://api.olamaps.io/places/v1/geocode?address=%s&bounds=%s&language=%s";
    reverse_geocode: "REVERSE_GEOCODE_URL", 1,
        "https://api.olamaps.io/places/v1/reverse-geocode?latlng=%s";
    distance_matrix: "DISTANCE_MATRIX_URL", 2,
        "https://api.olamaps.io/routing/v1/distanceMatrix?origins=%s&destinations=%s";
    array_of_data: "ARRAY_OF_DATA_URL", 1,
        "https://api.olamaps.io/tiles/vector/v1/data/%s.json";
    style_details: "STYLE_DETAILS_URL", 1,
        "https://api.olamaps.io/tiles/vector/v1/styles/%s/style.json";
    map_style: "MAP_STYLE_URL", 0,
        "https://api.olamaps.io/tiles/vector/v1/styles.json";
    place_detail: "PLACE_DETAIL_URL", 1,
        "https://api.olamaps.io/places/v1/details?place_id=%v";
    nearby_search: "NEARBY_SEARCH_URL", 7,
        "https://api.olamaps.io/places/v1/nearbysearch?layers=%s&location=%s&types=%s&radius=%s&strictbounds=%s&withCentroid=%s&limit=%s";
    text_search: "TEXT_SEARCH_URL", 5,
        "https://api.olamaps.io/places/v1/textsearch?input=%s&location=%s&radius=%s&types=%s&size=%s";
    snap_to_road: "SNAP_TO_ROAD_URL", 1,
        "https://api.olamaps.io/routing/v1/snapToRoad?%s";
    nearest_roads: "NEAREST_ROADS_URL", 2,
        "https://api.olamaps.io/routing/v1/nearestRoads?points=%s&radius=%s";
    static_map_center: "STATIC_MAP_IMAGE_CENTER_URL", 7,
        "https://api.olamaps.io/tiles/v1/styles/%s/static/%f,%f,%d/%dx%d.%s";
    static_map_bounded: "STATIC_MAP_IMAGE_BOUNDED_URL", 8,
        "https://api.olamaps.io/tiles/v1/styles/%s/static/%f,%f,%f,%f/%dx%d.%s";
    static_map: "STATIC_MAP_IMAGE_URL", 4,
        "https://api.olamaps.io/tiles/v1/styles/%s/static/auto/%dx%d.%s";
    vector_tile: "VECTOR_TILE_URL", 4,
        "https://api.olamaps.io/tiles/vector/v1/data/%s/%d/%d/%d.pbf";
}

impl Endpoints {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Checks that every template is non-empty and has the placeholder count
    /// its operation substitutes.
    pub fn validate(&self) -> ClientResult<()> {
        for (env, template, expected) in self.table() {
            if template.is_empty() {
                return Err(ClientError::Config(format!("{} is empty", env)));
            }
            let found = placeholder_count(template);
            if found != expected {
                return Err(ClientError::Config(format!(
                    "{} must have {} placeholder(s), found {}",
                    env, expected, found
                )));
            }
        }
        Ok(())
    }
}

/// Settings for building an [`OlaMaps`](crate::OlaMaps) client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    /// Per-request timeout; reqwest's default (none) when unset.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_endpoints_are_valid() {
        assert!(Endpoints::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_placeholder_mismatch() {
        let endpoints = Endpoints {
            directions: "https://example.com/directions?origin=%s".to_string(),
            ..Default::default()
        };
        let err = endpoints.validate().unwrap_err();
        assert!(err.to_string().contains("DIRECTIONS_URL"));
    }

    #[test]
    fn test_from_lookup_overrides_non_empty_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NEAREST_ROADS_URL", "http://localhost:9000/nearestRoads?points=%s&radius=%s"),
            ("GEOCODE_URL", "   "),
        ]);
        let endpoints = Endpoints::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            endpoints.nearest_roads,
            "http://localhost:9000/nearestRoads?points=%s&radius=%s"
        );
        assert_eq!(endpoints.geocode, Endpoints::default().geocode);
    }

    #[test]
    fn test_render_formats_each_verb() {
        let url = render(
            "https://api.olamaps.io/tiles/v1/styles/%s/static/%f,%f,%d/%dx%d.%s",
            &[
                TemplateArg::Str("default-light-standard"),
                TemplateArg::Float(77.61),
                TemplateArg::Float(12.93),
                TemplateArg::Int(15),
                TemplateArg::Int(800),
                TemplateArg::Int(600),
                TemplateArg::Str("png"),
            ],
        )
        .unwrap();

        assert_eq!(
            url,
            "https://api.olamaps.io/tiles/v1/styles/default-light-standard/static/77.610000,12.930000,15/800x600.png"
        );
    }

    #[test]
    fn test_render_argument_count_mismatch() {
        assert!(render("a=%s&b=%s", &[TemplateArg::Str("1")]).is_err());
        assert!(render("a=%s", &[TemplateArg::Str("1"), TemplateArg::Str("2")]).is_err());
        assert_eq!(render("100%% of %s", &[TemplateArg::Str("it")]).unwrap(), "100% of it");
    }

    #[test]
    fn test_query_escape() {
        assert_eq!(query_escape("12.9,77.6|13.0,77.7"), "12.9%2C77.6%7C13.0%2C77.7");
        assert_eq!(query_escape("coffee shop"), "coffee+shop");
    }
}
