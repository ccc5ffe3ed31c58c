mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use crate::error::{GradesError, Result};
use crate::services::canvas_api::ApiResponse;

/// Issues a GET for `url` and decodes the body as JSON.
///
/// Non-2xx responses are not errors here; the status travels with the body so
/// callers can inspect error payloads.
pub async fn fetch_json<C: HttpClient>(client: &C, url: &str) -> Result<ApiResponse> {
    let url = url
        .parse::<reqwest::Url>()
        .map_err(|e| GradesError::InvalidUrl(format!("{url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();
    let body = resp.json::<serde_json::Value>().await?;

    Ok(ApiResponse {
        status: status.as_u16(),
        body,
    })
}
