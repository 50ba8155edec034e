//! HTTP routes. Each API route translates query parameters and headers into
//! one [`MapsApi`](olamaps_client::MapsApi) call and its result into a response.

pub mod error;
pub mod places;
pub mod query;
pub mod routing;
pub mod tiles;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use olamaps_client::{ClientResult, ImageResponse};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use self::error::Payload;
use crate::server::AppState;

pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/token", get(token))
        .route("/api/v1/routing/directions", get(routing::directions))
        .route("/api/v1/routing/distance-matrix", get(routing::distance_matrix))
        .route("/api/v1/routing/snap-to-road", get(routing::snap_to_road))
        .route("/api/v1/routing/nearest-roads", get(routing::nearest_roads))
        .route("/api/v1/places/autocomplete", get(places::autocomplete))
        .route("/api/v1/places/geocode", get(places::geocode))
        .route("/api/v1/places/reverse-geocode", get(places::reverse_geocode))
        .route("/api/v1/places/details", get(places::details))
        .route("/api/v1/places/nearby-search", get(places::nearby_search))
        .route("/api/v1/places/text-search", get(places::text_search))
        .route("/api/v1/tiles/data", get(tiles::array_of_data))
        .route("/api/v1/tiles/styles", get(tiles::map_style))
        .route("/api/v1/tiles/style-details", get(tiles::style_details))
        .route("/api/v1/tiles/vector", get(tiles::vector_tile))
        .route("/api/v1/tiles/static/center", get(tiles::static_map_center))
        .route("/api/v1/tiles/static/bounded", get(tiles::static_map_bounded))
        .route("/api/v1/tiles/static/auto", get(tiles::static_map))
}

async fn health() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

/// Fetches a fresh access token with the gateway's own credentials.
async fn token(State(state): State<Arc<AppState>>) -> Response {
    let Some(credentials) = &state.credentials else {
        return error::internal_error(
            "credentials_not_configured",
            "Unable to get access token: client credentials are not configured",
        );
    };

    match state
        .api
        .acquire_token(&credentials.client_id, &credentials.client_secret)
        .await
    {
        Ok(token) => Json(json!({"access_token": token.as_str()})).into_response(),
        Err(e) => {
            warn!(error = %e, "Token acquisition failed");
            error::bad_gateway(e.code(), format!("Unable to get access token: {}", e))
        }
    }
}

pub(crate) fn json_response<T: Serialize>(result: ClientResult<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => error::from_client_error(&e, Payload::Json),
    }
}

/// Relays binary provider content under `content_type`.
pub(crate) fn binary_response(result: ClientResult<ImageResponse>, content_type: &str) -> Response {
    match result {
        Ok(image) => {
            debug!(bytes = image.bytes.len(), content_type = %content_type, "Relaying binary response");
            let value = HeaderValue::from_str(content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
            (StatusCode::OK, [(CONTENT_TYPE, value)], image.bytes).into_response()
        }
        Err(e) => error::from_client_error(&e, Payload::Binary),
    }
}
