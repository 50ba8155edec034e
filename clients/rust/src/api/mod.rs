//! Provider operations.
//!
//! Every operation follows the same pipeline: check required parameters, check
//! that a token is present, parse numeric parameters, render the endpoint
//! template and dispatch. The first failing step decides the error.

mod places;
mod routing;
mod tiles;

use std::{future::Future, sync::Arc};

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::{ClientConfig, Endpoints},
    dispatch::{dispatch_bytes, dispatch_json, Dispatcher, ImageResponse, ProviderRequest, ReqwestDispatcher},
    error::{ClientError, ClientResult},
    token::{acquire_token, BearerToken},
};

/// Per-call snapshot of the credentials and ids sent with a provider request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    pub token: Option<BearerToken>,
    pub request_id: String,
    pub correlation_id: Option<String>,
}

impl CallContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: Option<BearerToken>) -> Self {
        self.token = token;
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id.filter(|id| !id.is_empty());
        self
    }

    fn require_token(&self) -> ClientResult<&BearerToken> {
        self.token.as_ref().ok_or_else(ClientError::missing_token)
    }
}

/// Stateless operation handlers over a [`Dispatcher`].
///
/// Cheap to share behind an `Arc`; callers pass a [`CallContext`] per call.
#[derive(Clone)]
pub struct MapsApi {
    dispatcher: Arc<dyn Dispatcher>,
    endpoints: Arc<Endpoints>,
    http: reqwest::Client,
}

impl std::fmt::Debug for MapsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsApi")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl MapsApi {
    /// Handlers that talk to the provider over HTTP.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;
        let dispatcher = ReqwestDispatcher::new(http.clone());

        Self::build(config.endpoints, Arc::new(dispatcher), http)
    }

    /// Handlers over a caller-supplied dispatcher, e.g. [`MockDispatcher`](crate::MockDispatcher).
    pub fn with_dispatcher(endpoints: Endpoints, dispatcher: Arc<dyn Dispatcher>) -> ClientResult<Self> {
        Self::build(endpoints, dispatcher, reqwest::Client::new())
    }

    fn build(
        endpoints: Endpoints,
        dispatcher: Arc<dyn Dispatcher>,
        http: reqwest::Client,
    ) -> ClientResult<Self> {
        endpoints.validate()?;
        Ok(Self {
            dispatcher,
            endpoints: Arc::new(endpoints),
            http,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Exchanges client credentials for a token at the configured token URL.
    pub async fn acquire_token(&self, client_id: &str, client_secret: &str) -> ClientResult<BearerToken> {
        acquire_token(&self.http, &self.endpoints.token_url, client_id, client_secret).await
    }

    fn provider_request(&self, method: Method, url: String, ctx: &CallContext, token: &BearerToken) -> ProviderRequest {
        ProviderRequest {
            method,
            url,
            request_id: ctx.request_id.clone(),
            token: Some(token.clone()),
            correlation_id: ctx.correlation_id.clone(),
        }
    }

    async fn fetch_json<T>(&self, method: Method, url: String, ctx: &CallContext, token: &BearerToken) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.provider_request(method, url, ctx, token);
        dispatch_json(self.dispatcher.as_ref(), request).await
    }

    async fn fetch_bytes(&self, url: String, ctx: &CallContext, token: &BearerToken) -> ClientResult<ImageResponse> {
        let request = self.provider_request(Method::GET, url, ctx, token);
        dispatch_bytes(self.dispatcher.as_ref(), request).await
    }
}

/// Logs the start and any failure of one operation.
async fn traced<T, F>(operation: &'static str, ctx: &CallContext, call: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    debug!(operation, request_id = %ctx.request_id, "Calling provider operation");
    let result = call.await;
    if let Err(e) = &result {
        warn!(
            operation,
            request_id = %ctx.request_id,
            code = e.code(),
            error = %e,
            "Provider operation failed"
        );
    }
    result
}

/// Appends form-encoded `pairs` to `url` when there are any.
fn with_query(mut url: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return url;
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    url.push('?');
    url.push_str(&query);
    url
}
