//! Client for the Ola Maps routing, places and tiles APIs.
//!
//! ```no_run
//! use olamaps_client::{ClientConfig, OlaMaps};
//! use olamaps_protocol::routing::DirectionsParams;
//!
//! # async fn run() -> Result<(), olamaps_client::ClientError> {
//! let maps = OlaMaps::new("my-request-id", ClientConfig::default())?;
//! maps.configure_access_token("client-id", "client-secret").await?;
//! let directions = maps
//!     .directions(&DirectionsParams::new("12.93,77.61", "12.97,77.64"))
//!     .await?;
//! println!("{}", directions.status);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mock;
pub mod session;
pub mod token;

pub use api::{CallContext, MapsApi};
pub use config::{ClientConfig, Endpoints};
pub use dispatch::{Dispatcher, ImageResponse, ProviderRequest, RawResponse, ReqwestDispatcher};
pub use error::{ClientError, ClientResult};
pub use mock::MockDispatcher;
pub use session::OlaMaps;
pub use token::{acquire_token, BearerToken};
