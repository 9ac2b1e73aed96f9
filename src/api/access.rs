//! Access-key gate for the HTTP API.
//!
//! When `require_access_key` is enabled, every request except the service
//! info endpoint must carry the configured key in `X-Access-Key`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::error::ApiError;
use crate::config::AccessConfig;

pub const ACCESS_KEY_HEADER: &str = "x-access-key";

impl AccessConfig {
    /// Whether a request presenting `provided` may proceed.
    pub fn allows(&self, provided: Option<&str>) -> bool {
        if !self.require_access_key {
            return true;
        }

        !self.access_key.is_empty() && provided == Some(self.access_key.as_str())
    }
}

pub async fn require_access_key(
    State(access): State<AccessConfig>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == "/" {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(ACCESS_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !access.allows(provided) {
        warn!("Rejected request to {}: invalid access key", request.uri().path());
        return ApiError::unauthorized("Invalid or missing Access Key").into_response();
    }

    next.run(request).await
}
