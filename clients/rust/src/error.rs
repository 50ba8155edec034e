//! Client error types.
//!
//! Every operation fails with one of these variants. Nothing is retried.

use olamaps_protocol::ValidationError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub(crate) fn missing_token() -> Self {
        ClientError::Auth("Invalid OAuth token".to_string())
    }

    /// HTTP status returned by the provider, if the failure came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// Short machine-readable code, used for error bodies and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(ValidationError::MissingParameters { .. }) => {
                "missing_parameters"
            }
            ClientError::Validation(_) => "invalid_parameter",
            ClientError::Auth(_) => "invalid_token",
            ClientError::Network(_) => "network_error",
            ClientError::Provider { .. } => "provider_error",
            ClientError::Decode(_) => "decode_error",
            ClientError::Config(_) => "config_error",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
