//! HTTP gateway in front of the Ola Maps APIs.
//!
//! Every route under `/api/v1` maps one-to-one onto a
//! [`MapsApi`](olamaps_client::MapsApi) operation. Callers pass their own
//! bearer token in `Authorization`; the gateway holds no per-user state.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use olamaps_client::{ClientConfig, MapsApi};
//! use olamaps_gateway::{create_app, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = MapsApi::new(ClientConfig::default())?;
//!     let app = create_app(Arc::new(AppState::new(Arc::new(api), None)));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod routers;
pub mod server;

pub use config::{Credentials, GatewayConfig, ServerArgs};
pub use server::{create_app, serve, AppState};
