//! Trait and types for talking to the Canvas REST API.

use serde_json::Value;

use crate::error::Result;

/// A decoded API response: HTTP status plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over an authenticated Canvas GET.
///
/// Implementations attach credentials themselves; callers only supply the
/// absolute URL.
#[async_trait::async_trait]
pub trait CanvasApi: Send + Sync {
    async fn get(&self, url: &str) -> Result<ApiResponse>;
}
