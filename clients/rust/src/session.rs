//! Library-facing client session.
//!
//! [`OlaMaps`] owns a request id and the current access token and forwards
//! each call to [`MapsApi`] with a fresh [`CallContext`] snapshot, so replacing
//! the token never affects a request already in flight.

use std::sync::Arc;

use olamaps_protocol::{
    places::{
        Autocomplete, AutocompleteParams, Geocode, GeocodeParams, NearbySearch, NearbySearchParams,
        PlaceDetail, PlaceDetailParams, ReverseGeocode, ReverseGeocodeParams, TextSearch,
        TextSearchParams,
    },
    routing::{
        Directions, DirectionsParams, DistanceMatrix, DistanceMatrixParams, NearestRoads,
        NearestRoadsParams, SnapToRoad, SnapToRoadParams,
    },
    tiles::{
        ArrayOfData, ArrayOfDataParams, MapStyle, StaticMapBoundedParams, StaticMapCenterParams,
        StaticMapParams, StyleDetails, StyleDetailsParams, VectorTileParams,
    },
};
use parking_lot::RwLock;
use tracing::info;

use crate::{
    api::{CallContext, MapsApi},
    config::{ClientConfig, Endpoints},
    dispatch::{Dispatcher, ImageResponse},
    error::ClientResult,
    token::BearerToken,
};

#[derive(Debug)]
pub struct OlaMaps {
    api: MapsApi,
    request_id: String,
    token: RwLock<Option<BearerToken>>,
}

impl OlaMaps {
    /// Client that calls the provider over HTTP. Every request carries
    /// `request_id` as its `X-Request-Id`.
    pub fn new(request_id: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        Ok(Self::from_api(request_id, MapsApi::new(config)?))
    }

    pub fn with_dispatcher(
        request_id: impl Into<String>,
        endpoints: Endpoints,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> ClientResult<Self> {
        Ok(Self::from_api(
            request_id,
            MapsApi::with_dispatcher(endpoints, dispatcher)?,
        ))
    }

    pub fn from_api(request_id: impl Into<String>, api: MapsApi) -> Self {
        Self {
            api,
            request_id: request_id.into(),
            token: RwLock::new(None),
        }
    }

    pub fn api(&self) -> &MapsApi {
        &self.api
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Acquires a token with the client-credentials grant and stores it.
    /// On failure the previous token is kept.
    pub async fn configure_access_token(&self, client_id: &str, client_secret: &str) -> ClientResult<()> {
        let token = self.api.acquire_token(client_id, client_secret).await?;
        *self.token.write() = Some(token);
        info!(request_id = %self.request_id, "Access token configured");
        Ok(())
    }

    /// Stores a token obtained elsewhere. A `Bearer ` prefix is accepted and
    /// dropped; an empty token clears the session.
    pub fn set_access_token(&self, token: impl Into<String>) {
        *self.token.write() = BearerToken::new(token);
    }

    pub fn access_token(&self) -> Option<BearerToken> {
        self.token.read().clone()
    }

    /// Snapshot of the session used for a single call.
    pub fn context(&self) -> CallContext {
        CallContext::new(self.request_id.clone()).with_token(self.access_token())
    }

    /// Like [`context`](Self::context) with a fresh `X-Correlation-Id`, sent
    /// on every image and tile download.
    fn image_context(&self) -> CallContext {
        self.context()
            .with_correlation_id(Some(uuid::Uuid::new_v4().to_string()))
    }

    pub async fn directions(&self, params: &DirectionsParams) -> ClientResult<Directions> {
        self.api.directions(&self.context(), params).await
    }

    pub async fn distance_matrix(&self, params: &DistanceMatrixParams) -> ClientResult<DistanceMatrix> {
        self.api.distance_matrix(&self.context(), params).await
    }

    pub async fn snap_to_road(&self, params: &SnapToRoadParams) -> ClientResult<SnapToRoad> {
        self.api.snap_to_road(&self.context(), params).await
    }

    pub async fn nearest_roads(&self, params: &NearestRoadsParams) -> ClientResult<NearestRoads> {
        self.api.nearest_roads(&self.context(), params).await
    }

    pub async fn place_autocomplete(&self, params: &AutocompleteParams) -> ClientResult<Autocomplete> {
        self.api.place_autocomplete(&self.context(), params).await
    }

    pub async fn geocode(&self, params: &GeocodeParams) -> ClientResult<Geocode> {
        self.api.geocode(&self.context(), params).await
    }

    pub async fn reverse_geocode(&self, params: &ReverseGeocodeParams) -> ClientResult<ReverseGeocode> {
        self.api.reverse_geocode(&self.context(), params).await
    }

    pub async fn place_detail(&self, params: &PlaceDetailParams) -> ClientResult<PlaceDetail> {
        self.api.place_detail(&self.context(), params).await
    }

    pub async fn nearby_search(&self, params: &NearbySearchParams) -> ClientResult<NearbySearch> {
        self.api.nearby_search(&self.context(), params).await
    }

    pub async fn text_search(&self, params: &TextSearchParams) -> ClientResult<TextSearch> {
        self.api.text_search(&self.context(), params).await
    }

    pub async fn array_of_data(&self, params: &ArrayOfDataParams) -> ClientResult<ArrayOfData> {
        self.api.array_of_data(&self.context(), params).await
    }

    pub async fn style_details(&self, params: &StyleDetailsParams) -> ClientResult<StyleDetails> {
        self.api.style_details(&self.context(), params).await
    }

    pub async fn map_style(&self) -> ClientResult<Vec<MapStyle>> {
        self.api.map_style(&self.context()).await
    }

    pub async fn vector_tile(&self, params: &VectorTileParams) -> ClientResult<ImageResponse> {
        self.api.vector_tile(&self.image_context(), params).await
    }

    pub async fn static_map_center(&self, params: &StaticMapCenterParams) -> ClientResult<ImageResponse> {
        self.api.static_map_center(&self.image_context(), params).await
    }

    pub async fn static_map_bounded(&self, params: &StaticMapBoundedParams) -> ClientResult<ImageResponse> {
        self.api.static_map_bounded(&self.image_context(), params).await
    }

    /// Auto-fitted image. Unlike the stateless [`MapsApi::static_map`], a
    /// session requires the overlay `path`.
    pub async fn static_map(&self, params: &StaticMapParams) -> ClientResult<ImageResponse> {
        params.validate_with_path()?;
        self.api.static_map(&self.image_context(), params).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::MockDispatcher;

    fn session(mock: &MockDispatcher) -> OlaMaps {
        OlaMaps::with_dispatcher("session-req", Endpoints::default(), Arc::new(mock.clone())).unwrap()
    }

    #[tokio::test]
    async fn test_calls_fail_until_token_is_set() {
        let mock = MockDispatcher::with_fixtures();
        let maps = session(&mock);

        let err = maps.map_style().await.unwrap_err();
        assert!(err.is_auth());

        maps.set_access_token("Bearer abc");
        let styles = maps.map_style().await.unwrap();
        assert_eq!(styles[0].name, "Light");

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.request_id, "session-req");
        assert_eq!(sent.token.unwrap().as_str(), "abc");
    }

    #[tokio::test]
    async fn test_context_is_a_snapshot() {
        let mock = MockDispatcher::with_fixtures();
        let maps = session(&mock);
        maps.set_access_token("first");

        let ctx = maps.context();
        maps.set_access_token("second");

        assert_eq!(ctx.token.unwrap().as_str(), "first");
        assert_eq!(maps.access_token().unwrap().as_str(), "second");
    }

    #[tokio::test]
    async fn test_configure_access_token_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "issued",
                "token_type": "Bearer",
                "expires_in": 1800
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/places/v1/autocomplete"))
            .and(header("authorization", "Bearer issued"))
            .and(header("x-request-id", "lib-req"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "predictions": [{"description": "Koramangala", "place_id": "p1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let endpoints = Endpoints {
            token_url: format!("{}/token", server.uri()),
            place_autocomplete: format!("{}/places/v1/autocomplete?input=%s", server.uri()),
            ..Default::default()
        };
        let maps = OlaMaps::new("lib-req", ClientConfig::new(endpoints)).unwrap();

        maps.configure_access_token("id", "secret").await.unwrap();
        let result = maps
            .place_autocomplete(&AutocompleteParams::new("Koramangala"))
            .await
            .unwrap();

        assert_eq!(result.predictions[0].place_id, "p1");
    }

    #[tokio::test]
    async fn test_failed_configure_keeps_previous_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let endpoints = Endpoints {
            token_url: format!("{}/token", server.uri()),
            ..Default::default()
        };
        let maps = OlaMaps::new("lib-req", ClientConfig::new(endpoints)).unwrap();
        maps.set_access_token("kept");

        let err = maps.configure_access_token("id", "wrong").await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(maps.access_token().unwrap().as_str(), "kept");
    }

    #[tokio::test]
    async fn test_image_calls_carry_fresh_correlation_ids() {
        let mock = MockDispatcher::with_fixtures();
        let maps = session(&mock);
        maps.set_access_token("tok");

        let params = StaticMapCenterParams {
            style_name: "default-light-standard".into(),
            longitude: "77.61".into(),
            latitude: "12.93".into(),
            zoom_level: "15".into(),
            width: "800".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: Default::default(),
        };
        maps.static_map_center(&params).await.unwrap();
        maps.static_map_center(&params).await.unwrap();
        maps.map_style().await.unwrap();

        let sent = mock.requests();
        let first = sent[0].correlation_id.clone().unwrap();
        let second = sent[1].correlation_id.clone().unwrap();
        assert!(!first.is_empty());
        assert_ne!(first, second);
        assert!(sent[2].correlation_id.is_none());
    }

    #[tokio::test]
    async fn test_session_static_map_requires_path() {
        let mock = MockDispatcher::with_fixtures();
        let maps = session(&mock);
        maps.set_access_token("tok");

        let mut params = StaticMapParams {
            style_name: "default-light-standard".into(),
            width: "800".into(),
            height: "600".into(),
            format: "png".into(),
            overlay: Default::default(),
        };
        let err = maps.static_map(&params).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.request_count(), 0);

        params.overlay.path = "77.5,12.9|77.7,13.1".into();
        maps.static_map(&params).await.unwrap();
        assert!(mock.last_request().unwrap().correlation_id.is_some());
    }

    #[tokio::test]
    async fn test_request_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(std::time::Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let endpoints = Endpoints {
            map_style: format!("{}/tiles/vector/v1/styles.json", server.uri()),
            ..Default::default()
        };
        let config = ClientConfig::new(endpoints)
            .with_request_timeout(std::time::Duration::from_millis(200));
        let maps = OlaMaps::new("lib-req", config).unwrap();
        maps.set_access_token("tok");

        let err = maps.map_style().await.unwrap_err();
        assert_eq!(err.code(), "network_error");
    }
}
