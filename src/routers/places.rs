use std::sync::Arc;

use axum::{extract::State, response::Response};
use olamaps_protocol::places::{
    AutocompleteParams, GeocodeParams, NearbySearchParams, PlaceDetailParams, ReverseGeocodeParams,
    TextSearchParams,
};

use super::{
    json_response,
    query::{QueryParams, RequestContext},
};
use crate::server::AppState;

pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = AutocompleteParams::new(query.get("input"));
    json_response(state.api.place_autocomplete(&ctx, &params).await)
}

pub async fn geocode(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = GeocodeParams::new(
        query.get("address"),
        query.get("bounds"),
        query.get("language"),
    );
    json_response(state.api.geocode(&ctx, &params).await)
}

pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = ReverseGeocodeParams::new(query.get("latlng"));
    json_response(state.api.reverse_geocode(&ctx, &params).await)
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = PlaceDetailParams::new(query.get("place_id"));
    json_response(state.api.place_detail(&ctx, &params).await)
}

pub async fn nearby_search(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = NearbySearchParams {
        layers: query.get("layers"),
        location: query.get("location"),
        types: query.get("types"),
        radius: query.get("radius"),
        strictbounds: query.get("strictbounds"),
        with_centroid: query.get("withCentroid"),
        limit: query.get("limit"),
    };
    json_response(state.api.nearby_search(&ctx, &params).await)
}

pub async fn text_search(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = TextSearchParams {
        input: query.get("input"),
        location: query.get("location"),
        radius: query.get("radius"),
        types: query.get("types"),
        size: query.get("size"),
    };
    json_response(state.api.text_search(&ctx, &params).await)
}
