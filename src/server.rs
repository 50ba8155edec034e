//! Application state, router assembly and the serve loop.

use std::sync::Arc;

use axum::{extract::Request, Router};
use olamaps_client::MapsApi;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span};

use crate::{
    config::{Credentials, GatewayConfig},
    routers,
};

pub struct AppState {
    pub api: Arc<MapsApi>,
    pub credentials: Option<Credentials>,
}

impl AppState {
    pub fn new(api: Arc<MapsApi>, credentials: Option<Credentials>) -> Self {
        Self { api, credentials }
    }

    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let api = MapsApi::new(config.client.clone())?;
        Ok(Self::new(Arc::new(api), config.credentials.clone()))
    }
}

/// Builds the gateway router with request-id and tracing middleware.
pub fn create_app(state: Arc<AppState>) -> Router {
    routers::build_router()
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        token_route = config.credentials.is_some(),
        "Ola Maps gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Ola Maps gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
