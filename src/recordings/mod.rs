//! Recording operations exposed to the LMS.
//!
//! This module provides the core business logic for the recording and
//! transcript lookups. It is used by both the CLI and REST API.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::zoom::{
    meeting_segment, path_segment, CourseFilter, Discovery, RecordingDiscoverer,
    RecordingSummary, Result, TranscriptFetcher, TranscriptMessages, TranscriptOutcome, ZoomApi,
};

/// Recordings for an instructor, optionally narrowed to one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructorRecordings {
    pub recordings: Vec<RecordingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct RecordingService {
    api: Arc<dyn ZoomApi>,
}

impl RecordingService {
    pub fn new(api: Arc<dyn ZoomApi>) -> Self {
        Self { api }
    }

    /// Raw Zoom payload for `meetings/{id}/recordings`.
    pub async fn get_meeting_recordings(&self, meeting_id: &str) -> Result<Value> {
        let result: Result<Value> = async {
            let path = format!("meetings/{}/recordings", meeting_segment(meeting_id)?);
            self.api.get(&path, &[]).await
        }
        .await;

        result.inspect_err(|e| error!("Error retrieving meeting recordings: {}", e))
    }

    pub async fn get_meeting_transcript(&self, meeting_id: &str) -> Result<TranscriptOutcome> {
        let result: Result<TranscriptOutcome> = async {
            let value = self.get_meeting_recordings(meeting_id).await?;
            let recording: RecordingSummary = serde_json::from_value(value)?;

            TranscriptFetcher::new(self.api.as_ref())
                .fetch(&recording, TranscriptMessages::MEETING)
                .await
        }
        .await;

        result.inspect_err(|e| error!("Error retrieving meeting transcript: {}", e))
    }

    /// Every recording hosted by `instructor_id` (an email, login or Zoom
    /// user ID), keeping only those tagged with `course_id` when given.
    pub async fn get_instructor_recordings(
        &self,
        instructor_id: &str,
        course_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<InstructorRecordings> {
        match course_id {
            Some(course) => info!(
                "Starting recording search for instructor: {} with course filter: {}",
                instructor_id, course
            ),
            None => info!(
                "Starting recording search for instructor: {} (no course filter)",
                instructor_id
            ),
        }

        let result: Result<InstructorRecordings> = async {
            let discovered = RecordingDiscoverer::new(self.api.as_ref())
                .discover(instructor_id, cancel)
                .await?;

            let Discovery::Found(all) = discovered else {
                return Ok(InstructorRecordings {
                    recordings: Vec::new(),
                    message: Some("No Zoom user found".to_string()),
                });
            };

            info!("Total recordings found before filtering: {}", all.len());

            let recordings = CourseFilter::new(self.api.as_ref())
                .filter(&all, course_id, cancel)
                .await?;

            Ok(InstructorRecordings {
                recordings,
                message: None,
            })
        }
        .await;

        result.inspect_err(|e| error!("Error retrieving instructor recordings: {}", e))
    }

    pub async fn get_recording_transcript(&self, recording_id: &str) -> Result<TranscriptOutcome> {
        let result: Result<TranscriptOutcome> = async {
            let path = format!("recordings/{}", path_segment(recording_id)?);
            let value = match self.api.get(&path, &[]).await {
                Ok(value) => value,
                Err(err) if err.is_not_found() => {
                    return Ok(TranscriptOutcome::unavailable("Recording not found"));
                }
                Err(err) => return Err(err),
            };
            let recording: RecordingSummary = serde_json::from_value(value)?;

            TranscriptFetcher::new(self.api.as_ref())
                .fetch(&recording, TranscriptMessages::RECORDING)
                .await
        }
        .await;

        result.inspect_err(|e| error!("Error retrieving recording transcript: {}", e))
    }
}
