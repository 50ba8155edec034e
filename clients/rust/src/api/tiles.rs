use olamaps_protocol::{
    tiles::{
        ArrayOfData, ArrayOfDataParams, MapStyle, StaticMapBoundedParams, StaticMapCenterParams,
        StaticMapParams, StyleDetails, StyleDetailsParams, VectorTileParams,
    },
    Validate,
};
use reqwest::Method;

use super::{traced, with_query, CallContext, MapsApi};
use crate::{
    config::{query_escape, render, TemplateArg},
    dispatch::ImageResponse,
    error::ClientResult,
};

impl MapsApi {
    /// TileJSON metadata for a vector dataset.
    pub async fn array_of_data(&self, ctx: &CallContext, params: &ArrayOfDataParams) -> ClientResult<ArrayOfData> {
        traced("array_of_data", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.array_of_data,
                &[TemplateArg::Str(&query_escape(&params.dataset_name))],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    pub async fn style_details(
        &self,
        ctx: &CallContext,
        params: &StyleDetailsParams,
    ) -> ClientResult<StyleDetails> {
        traced("style_details", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.style_details,
                &[TemplateArg::Str(&query_escape(&params.style_name))],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    /// Catalogue of available map styles.
    pub async fn map_style(&self, ctx: &CallContext) -> ClientResult<Vec<MapStyle>> {
        traced("map_style", ctx, async {
            let token = ctx.require_token()?;
            let url = render(&self.endpoints.map_style, &[])?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    /// Raw vector tile (`.pbf`) for `z/x/y`.
    pub async fn vector_tile(&self, ctx: &CallContext, params: &VectorTileParams) -> ClientResult<ImageResponse> {
        traced("vector_tile", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let tile = params.parse()?;
            let url = render(
                &self.endpoints.vector_tile,
                &[
                    TemplateArg::Str(&query_escape(&params.dataset_name)),
                    TemplateArg::Int(tile.z),
                    TemplateArg::Int(tile.x),
                    TemplateArg::Int(tile.y),
                ],
            )?;
            self.fetch_bytes(url, ctx, token).await
        })
        .await
    }

    pub async fn static_map_center(
        &self,
        ctx: &CallContext,
        params: &StaticMapCenterParams,
    ) -> ClientResult<ImageResponse> {
        traced("static_map_center", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let view = params.parse()?;
            let url = render(
                &self.endpoints.static_map_center,
                &[
                    TemplateArg::Str(&query_escape(&params.style_name)),
                    TemplateArg::Float(view.longitude),
                    TemplateArg::Float(view.latitude),
                    TemplateArg::Int(view.zoom),
                    TemplateArg::Int(view.size.width),
                    TemplateArg::Int(view.size.height),
                    TemplateArg::Str(&params.format),
                ],
            )?;
            let url = with_query(url, &params.overlay.query_pairs());
            self.fetch_bytes(url, ctx, token).await
        })
        .await
    }

    pub async fn static_map_bounded(
        &self,
        ctx: &CallContext,
        params: &StaticMapBoundedParams,
    ) -> ClientResult<ImageResponse> {
        traced("static_map_bounded", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let view = params.parse()?;
            let url = render(
                &self.endpoints.static_map_bounded,
                &[
                    TemplateArg::Str(&query_escape(&params.style_name)),
                    TemplateArg::Float(view.min_x),
                    TemplateArg::Float(view.min_y),
                    TemplateArg::Float(view.max_x),
                    TemplateArg::Float(view.max_y),
                    TemplateArg::Int(view.size.width),
                    TemplateArg::Int(view.size.height),
                    TemplateArg::Str(&params.format),
                ],
            )?;
            let url = with_query(url, &params.overlay.query_pairs());
            self.fetch_bytes(url, ctx, token).await
        })
        .await
    }

    /// Static image fitted automatically around the overlay path.
    pub async fn static_map(&self, ctx: &CallContext, params: &StaticMapParams) -> ClientResult<ImageResponse> {
        traced("static_map", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let size = params.parse()?;
            let url = render(
                &self.endpoints.static_map,
                &[
                    TemplateArg::Str(&query_escape(&params.style_name)),
                    TemplateArg::Int(size.width),
                    TemplateArg::Int(size.height),
                    TemplateArg::Str(&params.format),
                ],
            )?;
            let url = with_query(url, &params.overlay.query_pairs());
            self.fetch_bytes(url, ctx, token).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use olamaps_protocol::{tiles::MapOverlay, ValidationError};

    use super::*;
    use crate::{config::Endpoints, error::ClientError, mock::PNG_BYTES, token::BearerToken, MockDispatcher};

    fn api(mock: &MockDispatcher) -> MapsApi {
        MapsApi::with_dispatcher(Endpoints::default(), Arc::new(mock.clone())).unwrap()
    }

    fn ctx() -> CallContext {
        CallContext::new("req-tiles")
            .with_token(BearerToken::new("tok"))
            .with_correlation_id(Some("corr-9".to_string()))
    }

    fn center() -> StaticMapCenterParams {
        StaticMapCenterParams {
            style_name: "default-light-standard".into(),
            longitude: "77.61".into(),
            latitude: "12.93".into(),
            zoom_level: "15".into(),
            width: "800".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: MapOverlay::default(),
        }
    }

    fn bounded() -> StaticMapBoundedParams {
        StaticMapBoundedParams {
            style_name: "default-light-standard".into(),
            min_x: "77.5".into(),
            min_y: "12.9".into(),
            max_x: "77.7".into(),
            max_y: "13.1".into(),
            width: "800".into(),
            height: "600".into(),
            format: "jpeg".into(),
            overlay: MapOverlay::default(),
        }
    }

    fn validation(err: ClientError) -> ValidationError {
        match err {
            ClientError::Validation(e) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_array_of_data() {
        let mock = MockDispatcher::with_fixtures();
        let result = api(&mock)
            .array_of_data(&ctx(), &ArrayOfDataParams::new("planet"))
            .await
            .unwrap();

        assert_eq!(result.id, "planet");
        assert_eq!(result.vector_layers[0].fields["class"], "String");
        assert!(mock.last_request().unwrap().url.ends_with("/tiles/vector/v1/data/planet.json"));
    }

    #[tokio::test]
    async fn test_style_details_and_catalogue() {
        let mock = MockDispatcher::with_fixtures();
        let api = api(&mock);

        let style = api
            .style_details(&ctx(), &StyleDetailsParams::new("default-light-standard"))
            .await
            .unwrap();
        assert_eq!(style.layers[0].id, "water");

        let styles = api.map_style(&ctx()).await.unwrap();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].id, "light");
    }

    #[tokio::test]
    async fn test_map_style_requires_token() {
        let mock = MockDispatcher::with_fixtures();
        let err = api(&mock).map_style(&CallContext::new("req")).await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_static_map_center_url_and_bytes() {
        let mock = MockDispatcher::with_fixtures();
        let mut params = center();
        params.overlay = MapOverlay::new(
            vec!["77.61,12.93|red|scale:0.9".into(), "77.62,12.94|blue".into()],
            "",
        );
        let image = api(&mock).static_map_center(&ctx(), &params).await.unwrap();

        assert_eq!(image.bytes.as_ref(), PNG_BYTES);
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.correlation_id.as_deref(), Some("corr-9"));
        assert!(sent.url.ends_with(
            "/styles/default-light-standard/static/77.610000,12.930000,15/800x600.png?marker=77.61%2C12.93%7Cred%7Cscale%3A0.9%2C77.62%2C12.94%7Cblue"
        ));
    }

    #[tokio::test]
    async fn test_static_map_center_numeric_order() {
        let mock = MockDispatcher::with_fixtures();
        let api = api(&mock);

        let mut params = center();
        params.longitude = "east".into();
        params.height = "tall".into();
        let err = api.static_map_center(&ctx(), &params).await.unwrap_err();
        assert_eq!(validation(err), ValidationError::InvalidLongitude);

        let mut params = center();
        params.zoom_level = "close".into();
        params.width = "wide".into();
        let err = api.static_map_center(&ctx(), &params).await.unwrap_err();
        assert_eq!(validation(err), ValidationError::InvalidZoomLevel);

        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_parameters_win_over_auth_and_parsing() {
        let mock = MockDispatcher::with_fixtures();
        let mut params = center();
        params.format = String::new();
        params.longitude = "east".into();
        let err = api(&mock)
            .static_map_center(&CallContext::new("req"), &params)
            .await
            .unwrap_err();

        assert_eq!(validation(err).missing(), &["format"]);
    }

    #[tokio::test]
    async fn test_auth_checked_before_numeric_parsing() {
        let mock = MockDispatcher::with_fixtures();
        let mut params = bounded();
        params.min_x = "west".into();
        let err = api(&mock)
            .static_map_bounded(&CallContext::new("req"), &params)
            .await
            .unwrap_err();

        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_static_map_bounded() {
        let mock = MockDispatcher::with_fixtures();
        let mut params = bounded();
        params.overlay = MapOverlay::new(vec![], "77.5,12.9|77.7,13.1");
        api(&mock).static_map_bounded(&ctx(), &params).await.unwrap();

        assert!(mock.last_request().unwrap().url.ends_with(
            "/static/77.500000,12.900000,77.700000,13.100000/800x600.jpeg?path=77.5%2C12.9%7C77.7%2C13.1"
        ));

        let mut params = bounded();
        params.max_x = "far".into();
        params.max_y = "farther".into();
        let err = api(&mock).static_map_bounded(&ctx(), &params).await.unwrap_err();
        assert_eq!(validation(err), ValidationError::InvalidMaxX);
    }

    #[tokio::test]
    async fn test_static_map_auto() {
        let mock = MockDispatcher::with_fixtures();
        let mut params = StaticMapParams {
            style_name: "default-light-standard".into(),
            width: "800".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: MapOverlay::new(vec![], "77.5,12.9|77.7,13.1"),
        };
        api(&mock).static_map(&ctx(), &params).await.unwrap();
        assert!(mock
            .last_request()
            .unwrap()
            .url
            .contains("/static/auto/800x600.png?path="));

        params.width = "8OO".into();
        let err = api(&mock).static_map(&ctx(), &params).await.unwrap_err();
        assert_eq!(validation(err), ValidationError::InvalidImageWidth);
    }

    #[tokio::test]
    async fn test_image_error_status() {
        let mock = MockDispatcher::with_fixtures();
        mock.override_route(
            "/static/",
            crate::dispatch::RawResponse {
                status: 404,
                content_type: Some("application/json".into()),
                body: bytes::Bytes::from_static(br#"{"message":"style not found"}"#),
            },
        );
        let err = api(&mock).static_map_center(&ctx(), &center()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_vector_tile() {
        let mock = MockDispatcher::with_fixtures();
        let tile = api(&mock)
            .vector_tile(&ctx(), &VectorTileParams::new("planet", "14", "11718", "7559"))
            .await
            .unwrap();

        assert_eq!(tile.content_type.as_deref(), Some("application/x-protobuf"));
        assert!(mock
            .last_request()
            .unwrap()
            .url
            .ends_with("/tiles/vector/v1/data/planet/14/11718/7559.pbf"));

        let err = api(&mock)
            .vector_tile(&ctx(), &VectorTileParams::new("planet", "z", "1", "1"))
            .await
            .unwrap_err();
        assert_eq!(validation(err), ValidationError::InvalidTileZ);
    }
}
