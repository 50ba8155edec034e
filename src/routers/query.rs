//! Request extractors shared by the API routes.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use olamaps_client::{
    dispatch::{HEADER_CORRELATION_ID, HEADER_REQUEST_ID},
    BearerToken, CallContext,
};

/// Decoded query string. Unlike `Query<T>` this keeps repeated keys, which
/// the static map routes need for `marker`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { pairs }
    }

    /// First value for `name`, or an empty string.
    pub fn get(&self, name: &str) -> String {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query()))
    }
}

/// Per-request [`CallContext`] built from the inbound headers.
///
/// The token comes from `Authorization` (with or without the `Bearer`
/// scheme). The request id is the one assigned by the request-id layer, or a
/// new UUID when the layer is absent.
#[derive(Debug, Clone)]
pub struct RequestContext(pub CallContext);

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let request_id = header(HEADER_REQUEST_ID).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let token = header(AUTHORIZATION.as_str()).and_then(BearerToken::new);

        Self(
            CallContext::new(request_id)
                .with_token(token)
                .with_correlation_id(header(HEADER_CORRELATION_ID)),
        )
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
