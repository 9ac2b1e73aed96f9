//! Transcript download for a single recording.

use serde::Serialize;
use tracing::{info, warn};

use super::client::ZoomApi;
use super::error::Result;
use super::models::{RecordingSummary, Transcript};
use crate::vtt;

/// User-facing messages for each way a transcript can be unavailable.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptMessages {
    pub no_file: &'static str,
    pub no_url: &'static str,
    pub download_failed: &'static str,
}

impl TranscriptMessages {
    /// Wording used when looking up a transcript by meeting ID.
    pub const MEETING: Self = Self {
        no_file: "No transcript found",
        no_url: "No transcript URL available",
        download_failed: "Failed to retrieve transcript content",
    };

    /// Wording used when looking up a transcript by recording ID.
    pub const RECORDING: Self = Self {
        no_file: "No transcript available",
        no_url: "No transcript URL available",
        download_failed: "Failed to retrieve transcript",
    };
}

/// Parsed transcript, or a message explaining why there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptOutcome {
    pub transcript: Option<Transcript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TranscriptOutcome {
    pub fn found(transcript: Transcript) -> Self {
        Self {
            transcript: Some(transcript),
            message: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            transcript: None,
            message: Some(message.into()),
        }
    }
}

pub struct TranscriptFetcher<'a, A: ZoomApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ZoomApi + ?Sized> TranscriptFetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Download and parse the recording's transcript file.
    ///
    /// Download failures become an unavailable outcome; token and
    /// configuration errors are returned.
    pub async fn fetch(
        &self,
        recording: &RecordingSummary,
        messages: TranscriptMessages,
    ) -> Result<TranscriptOutcome> {
        let Some(file) = recording.transcript_file() else {
            return Ok(TranscriptOutcome::unavailable(messages.no_file));
        };

        let Some(url) = file.download_url.as_deref().filter(|u| !u.is_empty()) else {
            return Ok(TranscriptOutcome::unavailable(messages.no_url));
        };

        let content = match self.api.download_text(url).await {
            Ok(content) => content,
            Err(err) if err.is_request_failure() => {
                warn!("Error retrieving transcript: {}", err);
                return Ok(TranscriptOutcome::unavailable(messages.download_failed));
            }
            Err(err) => return Err(err),
        };

        if content.is_empty() {
            return Ok(TranscriptOutcome::unavailable(messages.download_failed));
        }

        let transcript = vtt::parse(&content);
        info!(
            "Parsed {} captions for recording {}",
            transcript.len(),
            recording.id
        );
        Ok(TranscriptOutcome::found(transcript))
    }
}
