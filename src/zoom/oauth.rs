//! Server-to-server OAuth for the Zoom API.
//!
//! Zoom issues short-lived bearer tokens for an account through the
//! `account_credentials` grant. [`TokenProvider`] keeps the current token and
//! exchanges credentials for a new one once it has expired.

use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::error::{Result, ZoomError};
use super::models::ProviderCredentials;

/// Upper bound on how long a token is trusted, whatever `expires_in` says.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

const BAD_CREDENTIALS_MESSAGE: &str =
    "Failed to obtain Zoom access token. Please check your Zoom credentials.";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Bearer token together with the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    pub fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

pub struct TokenProvider {
    client: reqwest::Client,
    token_url: String,
    credentials: Option<ProviderCredentials>,
    // Held across the exchange so concurrent callers share one refresh.
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        credentials: Option<ProviderCredentials>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Current bearer token, fetching a new one if the cached token expired.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.value.clone());
        }

        let credentials = self.credentials.as_ref().ok_or(ZoomError::Config)?;
        let token = self.exchange(credentials).await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    async fn exchange(&self, credentials: &ProviderCredentials) -> Result<AccessToken> {
        debug!("Requesting Zoom access token from {}", self.token_url);

        let form = [
            ("grant_type", "account_credentials"),
            ("account_id", credentials.account_id.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let issued_at = Instant::now();
        let response = self.client.post(&self.token_url).form(&form).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::BAD_REQUEST {
            error!("{} Details: {}", BAD_CREDENTIALS_MESSAGE, body);
            return Err(ZoomError::Auth {
                status: status.as_u16(),
                message: BAD_CREDENTIALS_MESSAGE.to_string(),
            });
        }

        if status.is_client_error() {
            error!("Zoom token request rejected with status {}: {}", status, body);
            return Err(ZoomError::Auth {
                status: status.as_u16(),
                message: format!("Zoom token request rejected with status {}", status),
            });
        }

        if !status.is_success() {
            return Err(ZoomError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        info!("Obtained Zoom access token (expires in {}s)", token.expires_in);

        let lifetime = Duration::from_secs(token.expires_in).min(MAX_TOKEN_LIFETIME);

        Ok(AccessToken {
            value: token.access_token,
            expires_at: issued_at.checked_add(lifetime).unwrap_or(issued_at),
        })
    }
}
