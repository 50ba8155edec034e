use std::sync::Arc;

use axum::{extract::State, response::Response};
use olamaps_protocol::{
    routing::{DirectionsParams, DistanceMatrixParams, NearestRoadsParams, SnapToRoadParams},
    Normalizable,
};

use super::{
    json_response,
    query::{QueryParams, RequestContext},
};
use crate::server::AppState;

pub async fn directions(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = DirectionsParams::new(query.get("origin"), query.get("destination"));
    json_response(state.api.directions(&ctx, &params).await)
}

pub async fn distance_matrix(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = DistanceMatrixParams::new(query.get("origins"), query.get("destinations"));
    json_response(state.api.distance_matrix(&ctx, &params).await)
}

pub async fn snap_to_road(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = SnapToRoadParams::new(query.get("points"), query.get("enhancePath"));
    json_response(state.api.snap_to_road(&ctx, &params).await)
}

/// Radius defaults to 500 m when absent.
pub async fn nearest_roads(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let mut params = NearestRoadsParams::new(query.get("points"), query.get("radius"));
    params.normalize();
    json_response(state.api.nearest_roads(&ctx, &params).await)
}
