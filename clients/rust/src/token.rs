//! OAuth client-credentials token bootstrap.

use std::fmt;

use olamaps_protocol::validated::check_required;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Raw OAuth access token. Never carries a `Bearer ` prefix; the dispatcher
/// adds it when building the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token, dropping a leading `Bearer` scheme (any case) if present.
    /// Returns `None` for an empty token, including a bare scheme.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        let raw = match trimmed.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            None if trimmed.eq_ignore_ascii_case("bearer") => "",
            _ => trimmed,
        };
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges client credentials for an access token.
pub async fn acquire_token(
    http: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> ClientResult<BearerToken> {
    check_required(&[("clientId", client_id), ("clientSecret", client_secret)])?;

    let form = [
        ("grant_type", "client_credentials"),
        ("scope", "openid"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    debug!(url = %token_url, "Requesting access token");
    let response = http
        .post(token_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| {
            warn!(url = %token_url, error = %e, "Token request failed");
            ClientError::Network(e.to_string())
        })?;

    let status = response.status();
    let body = response.bytes().await?;

    if status != reqwest::StatusCode::OK {
        warn!(url = %token_url, status = %status, "Token endpoint rejected credentials");
        return Err(ClientError::Provider {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let parsed: TokenResponse =
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

    debug!(
        token_type = parsed.token_type.as_deref().unwrap_or("unknown"),
        expires_in = parsed.expires_in.unwrap_or_default(),
        "Access token acquired"
    );

    BearerToken::new(parsed.access_token)
        .ok_or_else(|| ClientError::Decode("token response has an empty access_token".to_string()))
}
