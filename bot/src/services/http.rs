//! Helpers shared by the HTTP-backed collaborators

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use shared::ApiFailure;

/// Build a client with the configured request timeout
pub fn build_client(timeout: Duration) -> Result<Client, ApiFailure> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("third-thursday-bot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiFailure::NotConfigured(format!("HTTP client: {e}")))
}

/// Parse a base URL, making sure it ends in `/` so that `join` appends
pub fn parse_base_url(raw: &str) -> Result<Url, ApiFailure> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ApiFailure::NotConfigured(format!("invalid URL {raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join a relative path onto a base URL
pub fn endpoint(base: &Url, path: &str) -> Result<Url, ApiFailure> {
    base.join(path)
        .map_err(|e| ApiFailure::NotConfigured(format!("invalid endpoint {path}: {e}")))
}

/// Send a request, mapping transport errors and non-success statuses
pub async fn send(request: reqwest::RequestBuilder) -> Result<Response, ApiFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::NetworkError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiFailure::from_status(status.as_u16(), status.canonical_reason().unwrap_or("")));
    }
    Ok(response)
}

/// Decode a JSON body
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiFailure::InvalidResponse(format!("Failed to parse response: {e}")))
}
