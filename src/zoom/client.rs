//! Authenticated Zoom REST client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{Result, ZoomError};
use super::oauth::TokenProvider;
use crate::config::ZoomConfig;

/// The Zoom API surface the recording components depend on.
#[async_trait]
pub trait ZoomApi: Send + Sync {
    /// Perform an authenticated JSON request against `{base_url}/{path}`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value>;

    /// Download a recording file as text using the current bearer token.
    async fn download_text(&self, url: &str) -> Result<String>;

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }
}

pub struct ZoomClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenProvider>,
}

impl ZoomClient {
    pub fn new(client: reqwest::Client, base_url: &str, tokens: Arc<TokenProvider>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Build a client and token provider sharing one connection pool.
    pub fn from_config(config: &ZoomConfig) -> Result<Self> {
        let client = http_client(config.request_timeout())?;
        let tokens = Arc::new(TokenProvider::new(
            client.clone(),
            config.token_url.clone(),
            config.credentials(),
        ));

        Ok(Self::new(client, &config.api_base_url, tokens))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Encode `id` as exactly one URL path segment.
///
/// `/`, `?` and `%` are escaped so an identifier can never reach a different
/// endpoint. Empty and dot segments are rejected outright.
pub fn path_segment(id: &str) -> Result<String> {
    if matches!(id, "" | "." | "..") {
        return Err(ZoomError::InvalidIdentifier(id.to_string()));
    }
    Ok(urlencoding::encode(id).into_owned())
}

/// Path segment for a meeting ID or UUID.
///
/// Zoom requires UUIDs that begin with `/` or contain `//` to be encoded twice.
pub fn meeting_segment(id: &str) -> Result<String> {
    let once = path_segment(id)?;
    if id.starts_with('/') || id.contains("//") {
        return Ok(urlencoding::encode(&once).into_owned());
    }
    Ok(once)
}

/// Shared reqwest client with a per-request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

#[async_trait]
impl ZoomApi for ZoomClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.tokens.access_token().await?;
        let url = self.url(path);

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .query(query);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("Zoom API {} returned {}: {}", path, status, text);
            return Err(ZoomError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn download_text(&self, url: &str) -> Result<String> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Transcript download failed with status {}", status);
            return Err(ZoomError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
