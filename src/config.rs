//! Gateway configuration from command-line flags and the environment.

use std::{fmt, net::SocketAddr, time::Duration};

use anyhow::Context;
use clap::Parser;
use olamaps_client::{ClientConfig, Endpoints};
use tracing::warn;

#[derive(Parser, Clone)]
#[command(name = "olamaps-gateway", version, about = "HTTP gateway for the Ola Maps APIs")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "OLAMAPS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "OLAMAPS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// OAuth client id used by `/api/v1/token`
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret used by `/api/v1/token`
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Timeout for each provider request; none when unset
    #[arg(long, env = "OLAMAPS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Log filter, e.g. `info` or `olamaps_client=debug,info`. `RUST_LOG` wins when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl fmt::Debug for ServerArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerArgs")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Client credentials for the token route.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub credentials: Option<Credentials>,
    pub client: ClientConfig,
}

impl ServerArgs {
    /// Resolves the gateway configuration. Endpoint templates come from the
    /// environment and are validated here so a bad override fails at startup.
    pub fn into_config(self) -> anyhow::Result<GatewayConfig> {
        self.into_config_with(Endpoints::from_env())
    }

    pub fn into_config_with(self, endpoints: Endpoints) -> anyhow::Result<GatewayConfig> {
        let bind_addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))?;

        endpoints.validate().context("invalid provider endpoint configuration")?;

        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let credentials = match (non_empty(self.client_id), non_empty(self.client_secret)) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => {
                warn!("Only one of CLIENT_ID and CLIENT_SECRET is set; the token route is disabled");
                None
            }
        };

        let mut client = ClientConfig::new(endpoints);
        if let Some(secs) = self.request_timeout_secs.filter(|s| *s > 0) {
            client = client.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(GatewayConfig {
            bind_addr,
            credentials,
            client,
        })
    }
}
