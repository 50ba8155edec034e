//! Request dispatch to the provider.
//!
//! A [`Dispatcher`] performs one HTTP exchange and hands back the raw status,
//! content type and body. [`dispatch_json`] and [`dispatch_bytes`] layer the
//! decoding rules on top so every operation shares them.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{ClientError, ClientResult},
    token::BearerToken,
};

pub const HEADER_REQUEST_ID: &str = "X-Request-Id";
pub const HEADER_CORRELATION_ID: &str = "X-Correlation-Id";

/// A single outbound provider call.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub method: Method,
    pub url: String,
    pub request_id: String,
    pub token: Option<BearerToken>,
    pub correlation_id: Option<String>,
}

/// What came back from the provider, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_provider_error(self) -> ClientError {
        ClientError::Provider {
            status: self.status,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

/// Binary payload returned by the static map and vector tile operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Transport seam between operations and the network.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> ClientResult<RawResponse>;
}

/// Sends the request and decodes a 2xx body into `T`.
pub async fn dispatch_json<T>(dispatcher: &dyn Dispatcher, request: ProviderRequest) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let url = request.url.clone();
    let response = dispatcher.send(request).await?;
    if !response.is_success() {
        warn!(url = %url, status = response.status, "Provider returned an error status");
        return Err(response.into_provider_error());
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        warn!(url = %url, error = %e, "Failed to decode provider response");
        ClientError::Decode(e.to_string())
    })
}

/// Sends the request and returns the body verbatim; non-2xx becomes a
/// provider error.
pub async fn dispatch_bytes(
    dispatcher: &dyn Dispatcher,
    request: ProviderRequest,
) -> ClientResult<ImageResponse> {
    let url = request.url.clone();
    let response = dispatcher.send(request).await?;
    if !response.is_success() {
        warn!(url = %url, status = response.status, "Provider returned an error status");
        return Err(response.into_provider_error());
    }

    Ok(ImageResponse {
        status: response.status,
        content_type: response.content_type,
        bytes: response.body,
    })
}

/// [`Dispatcher`] backed by a shared `reqwest::Client`. Timeouts are the
/// client's own.
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    http: reqwest::Client,
}

impl ReqwestDispatcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn send(&self, request: ProviderRequest) -> ClientResult<RawResponse> {
        debug!(
            method = %request.method,
            url = %request.url,
            request_id = %request.request_id,
            "Sending request to provider"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .header(HEADER_REQUEST_ID, &request.request_id);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(correlation_id) = &request.correlation_id {
            builder = builder.header(HEADER_CORRELATION_ID, correlation_id);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "Request to provider failed");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.inspect_err(|e| {
            warn!(url = %request.url, error = %e, "Failed to read provider response body");
        })?;

        debug!(url = %request.url, status = status, bytes = body.len(), "Received provider response");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
