use crate::ports::outbound::GatewayResult;
use crate::scan_submission::domain::Credential;
use crate::scan_submission::policies::FailureOutcome;
use crate::shared::Result;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;

/// Builds the shared async client with the given request deadline
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("docscan/{}", version);
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Joins the configured base URL and an endpoint path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Adds `Authorization: Bearer` (when a credential exists) and
/// `Accept: application/json`.
pub fn decorate(
    request: reqwest::RequestBuilder,
    credential: Option<&Credential>,
) -> reqwest::RequestBuilder {
    authorize(
        request.header(ACCEPT, HeaderValue::from_static("application/json")),
        credential,
    )
}

/// Adds `Authorization: Bearer` when a credential exists
pub fn authorize(
    request: reqwest::RequestBuilder,
    credential: Option<&Credential>,
) -> reqwest::RequestBuilder {
    match credential {
        Some(credential) => request.bearer_auth(credential.as_str()),
        None => request,
    }
}

/// Maps a transport error onto a [`FailureOutcome`].
///
/// Only a deadline expiry counts as a timeout. A request that could not be
/// built is not a connectivity problem; everything else (refused, reset,
/// DNS, TLS, body interrupted) means no usable HTTP response.
pub fn transport_failure(err: reqwest::Error) -> FailureOutcome {
    let message = describe(&err);
    if err.is_timeout() {
        FailureOutcome::Timeout
    } else if err.is_builder() || err.is_decode() {
        FailureOutcome::Other { message }
    } else {
        FailureOutcome::Connectivity { message }
    }
}

/// Innermost cause of a reqwest error, which carries the useful text
/// (e.g. "Connection refused (os error 111)").
fn describe(err: &reqwest::Error) -> String {
    let mut cause: &dyn StdError = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    let text = cause.to_string();
    if text.is_empty() {
        err.to_string()
    } else {
        text
    }
}

/// Reads a response: success bodies are parsed into `T` via `parse`,
/// non-success statuses become `FailureOutcome::Http` with the JSON body
/// (or `null` when the body is not JSON).
pub async fn read_response<T>(
    response: reqwest::Response,
    parse: impl FnOnce(&[u8]) -> serde_json::Result<T>,
) -> GatewayResult<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_failure)?;

    if !status.is_success() {
        let body = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
        log::debug!("HTTP {} with body {}", status.as_u16(), body);
        return Err(FailureOutcome::http(status.as_u16(), body));
    }

    parse(&body).map_err(|e| FailureOutcome::Other {
        message: format!("Malformed response body: {}", e),
    })
}

/// [`read_response`] for plain JSON bodies
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    read_response(response, |body| serde_json::from_slice(body)).await
}
