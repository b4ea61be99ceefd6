//! Shared request/response handling.

use crate::error::{ClientError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Attach the bearer token, if any.
pub(crate) fn authorize(builder: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
    match access_token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Send a request, classifying connection failures as unreachable.
pub(crate) async fn send(builder: RequestBuilder) -> Result<Response> {
    builder.send().await.map_err(|e| {
        if e.is_connect() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Decode a 2xx JSON body or turn the status into an error.
pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        Err(status_error(response).await)
    }
}

/// Map a non-success response to a `ClientError`.
pub(crate) async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();

    match status {
        401 => ClientError::AuthRequired,
        429 => {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            ClientError::RateLimited { retry_after_secs }
        }
        _ => {
            let message = response.text().await.unwrap_or_default();
            ClientError::ServerError { status, message }
        }
    }
}
