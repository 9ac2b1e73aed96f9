//! Error type shared by every Zoom API component.

use thiserror::Error;

/// Zoom's error code for "meeting does not exist" on report endpoints.
pub const MEETING_NOT_FOUND_CODE: i64 = 3001;

#[derive(Error, Debug)]
pub enum ZoomError {
    #[error("Zoom client configuration not found")]
    Config,

    #[error("{message}")]
    Auth { status: u16, message: String },

    #[error("Zoom API request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Zoom API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode Zoom API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid Zoom identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ZoomError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Zoom's numeric `code` from a JSON error body.
    pub fn provider_code(&self) -> Option<i64> {
        let Self::Http { body, .. } = self else {
            return None;
        };

        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("code")?
            .as_i64()
    }

    /// Errors that belong to a single upstream request rather than to the
    /// client as a whole.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Transport(_) | Self::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, ZoomError>;
