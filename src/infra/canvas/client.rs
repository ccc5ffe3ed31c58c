use async_trait::async_trait;
use tracing::debug;

use crate::error::{GradesError, Result};
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::services::canvas_api::{ApiResponse, CanvasApi};

/// [`CanvasApi`] backed by any [`HttpClient`] stack.
pub struct CanvasHttpClient<C> {
    http: C,
}

impl<C: HttpClient> CanvasHttpClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }
}

impl CanvasHttpClient<ApiKey<BasicClient>> {
    /// The default stack: a timeout-bounded reqwest client sending
    /// `Authorization: Bearer <token>` on every request.
    pub fn with_token(token: &str) -> Result<Self> {
        let basic = BasicClient::new().map_err(|e| GradesError::Client(e.to_string()))?;
        let http =
            ApiKey::bearer(basic, token).map_err(|e| GradesError::Client(format!("{e:#}")))?;
        Ok(Self::new(http))
    }
}

#[async_trait]
impl<C: HttpClient> CanvasApi for CanvasHttpClient<C> {
    async fn get(&self, url: &str) -> Result<ApiResponse> {
        debug!(url, "Canvas GET");
        let response = fetch_json(&self.http, url).await?;
        debug!(url, status = response.status, "Canvas response received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token_rejects_unusable_token() {
        let err = CanvasHttpClient::with_token("bad\ntoken").err().unwrap();
        assert!(matches!(err, GradesError::Client(_)));
    }
}
