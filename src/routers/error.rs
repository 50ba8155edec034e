use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use olamaps_client::ClientError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    error_type: &'static str,
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    param: Option<String>,
}

pub const HEADER_X_GATEWAY_ERROR_CODE: &str = "X-Gateway-Error-Code";

pub fn internal_error(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::UNAUTHORIZED, code, message)
}

pub fn bad_gateway(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::BAD_GATEWAY, code, message)
}

pub fn create_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    create_error_with_param(status, code, message, None)
}

fn create_error_with_param(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
    param: Option<String>,
) -> Response {
    let code_str = code.into();
    let message_str = message.into();

    let mut headers = HeaderMap::with_capacity(1);
    if let Ok(val) = HeaderValue::from_str(&code_str) {
        headers.insert(HEADER_X_GATEWAY_ERROR_CODE, val);
    }

    (
        status,
        headers,
        Json(ErrorResponse {
            error: ErrorDetail {
                error_type: status_code_to_str(status),
                code: &code_str,
                message: &message_str,
                param,
            },
        }),
    )
        .into_response()
}

fn status_code_to_str(status_code: StatusCode) -> &'static str {
    status_code
        .canonical_reason()
        .unwrap_or("Unknown Status Code")
}

pub fn extract_error_code_from_response<B>(response: &Response<B>) -> &str {
    response
        .headers()
        .get(HEADER_X_GATEWAY_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Whether the failed operation returns JSON or relays binary content.
/// Binary operations keep the provider's error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Json,
    Binary,
}

/// Maps a client failure onto the gateway's HTTP error contract.
pub fn from_client_error(err: &ClientError, payload: Payload) -> Response {
    let code = err.code();
    match err {
        ClientError::Validation(validation) => {
            let param = match validation.missing() {
                [] => None,
                names => Some(names.join(",")),
            };
            create_error_with_param(StatusCode::BAD_REQUEST, code, err.to_string(), param)
        }
        ClientError::Auth(message) => unauthorized(code, message.as_str()),
        ClientError::Network(_) | ClientError::Decode(_) => bad_gateway(code, err.to_string()),
        ClientError::Provider { status, body } => {
            let upstream = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            let status = match payload {
                Payload::Binary => upstream,
                Payload::Json if upstream.is_client_error() => upstream,
                Payload::Json => StatusCode::BAD_GATEWAY,
            };
            create_error(status, code, body.as_str())
        }
        ClientError::Config(_) => internal_error(code, err.to_string()),
    }
}
