use std::sync::Arc;

use axum::{extract::State, response::Response};
use olamaps_protocol::tiles::{
    ArrayOfDataParams, MapOverlay, StaticMapBoundedParams, StaticMapCenterParams, StaticMapParams,
    StyleDetailsParams, VectorTileParams,
};

use super::{
    binary_response, json_response,
    query::{QueryParams, RequestContext},
};
use crate::server::AppState;

const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

fn overlay(query: &QueryParams) -> MapOverlay {
    MapOverlay::new(query.all("marker"), query.get("path"))
}

fn image_content_type(format: &str) -> String {
    format!("image/{}", format)
}

pub async fn array_of_data(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = ArrayOfDataParams::new(query.get("dataset_name"));
    json_response(state.api.array_of_data(&ctx, &params).await)
}

pub async fn map_style(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
) -> Response {
    json_response(state.api.map_style(&ctx).await)
}

pub async fn style_details(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = StyleDetailsParams::new(query.get("style_name"));
    json_response(state.api.style_details(&ctx, &params).await)
}

pub async fn vector_tile(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = VectorTileParams::new(
        query.get("dataset_name"),
        query.get("z"),
        query.get("x"),
        query.get("y"),
    );
    let result = state.api.vector_tile(&ctx, &params).await;
    let content_type = result
        .as_ref()
        .ok()
        .and_then(|tile| tile.content_type.clone())
        .unwrap_or_else(|| PROTOBUF_CONTENT_TYPE.to_string());
    binary_response(result, &content_type)
}

pub async fn static_map_center(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = StaticMapCenterParams {
        style_name: query.get("styleName"),
        longitude: query.get("longitude"),
        latitude: query.get("latitude"),
        zoom_level: query.get("zoom"),
        width: query.get("width"),
        height: query.get("height"),
        format: query.get("format"),
        overlay: overlay(&query),
    };
    let result = state.api.static_map_center(&ctx, &params).await;
    binary_response(result, &image_content_type(&params.format))
}

pub async fn static_map_bounded(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = StaticMapBoundedParams {
        style_name: query.get("styleName"),
        min_x: query.get("min_x"),
        min_y: query.get("min_y"),
        max_x: query.get("max_x"),
        max_y: query.get("max_y"),
        width: query.get("width"),
        height: query.get("height"),
        format: query.get("format"),
        overlay: overlay(&query),
    };
    let result = state.api.static_map_bounded(&ctx, &params).await;
    binary_response(result, &image_content_type(&params.format))
}

pub async fn static_map(
    State(state): State<Arc<AppState>>,
    RequestContext(ctx): RequestContext,
    query: QueryParams,
) -> Response {
    let params = StaticMapParams {
        style_name: query.get("styleName"),
        width: query.get("width"),
        height: query.get("height"),
        format: query.get("format"),
        overlay: overlay(&query),
    };
    let result = state.api.static_map(&ctx, &params).await;
    binary_response(result, &image_content_type(&params.format))
}
