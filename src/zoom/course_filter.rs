//! Course matching for discovered recordings.
//!
//! The Canvas course a meeting belongs to is only visible on the meeting's
//! usage report, as the `"Canvas Course"` tracking field. A failed report
//! lookup excludes that one recording; it never fails the batch.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::client::{meeting_segment, ZoomApi};
use super::discovery::cancellable;
use super::error::{Result, ZoomError, MEETING_NOT_FOUND_CODE};
use super::models::{MeetingReport, RecordingSummary};

pub struct CourseFilter<'a, A: ZoomApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ZoomApi + ?Sized> CourseFilter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Keep recordings whose report matches `course_id`, projected to their
    /// MP4 and transcript files. No course ID keeps every reportable recording.
    pub async fn filter(
        &self,
        recordings: &[RecordingSummary],
        course_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<RecordingSummary>> {
        let course_id = course_id.filter(|c| !c.is_empty());
        let mut matched = Vec::new();

        for recording in recordings {
            if cancel.is_cancelled() {
                return Err(ZoomError::Cancelled);
            }

            let report = match self.report_for(recording, cancel).await {
                Ok(Some(report)) => report,
                Ok(None) => continue,
                Err(err) => return Err(err),
            };

            info!(
                "Checking meeting ID: {} - Topic: {}",
                recording.id,
                recording.topic.as_deref().unwrap_or("No topic")
            );

            match course_id {
                None => {
                    info!("Including meeting {} (no course filter)", recording.id);
                    matched.push(recording.lms_view());
                }
                Some(course) if report.course_id().as_deref() == Some(course) => {
                    info!(
                        "Found matching course ID {} for meeting {}",
                        course, recording.id
                    );
                    matched.push(recording.lms_view());
                }
                Some(_) => info!("No matching course ID for meeting {}", recording.id),
            }
        }

        match course_id {
            Some(course) => info!(
                "Found {} recordings matching course ID {}",
                matched.len(),
                course
            ),
            None => info!("Found {} recordings for instructor", matched.len()),
        }

        Ok(matched)
    }

    /// Fetch the usage report, retrying by UUID when Zoom does not know the
    /// numeric ID. `Ok(None)` means the recording should be skipped.
    async fn report_for(
        &self,
        recording: &RecordingSummary,
        cancel: &CancellationToken,
    ) -> Result<Option<MeetingReport>> {
        let err = match self.fetch_report(&recording.id, cancel).await {
            Ok(report) => return Ok(Some(report)),
            Err(err) if err.is_request_failure() => err,
            Err(err) => return Err(err),
        };

        if !(err.is_not_found() && err.provider_code() == Some(MEETING_NOT_FOUND_CODE)) {
            warn!("Failed to get report for meeting {}: {}", recording.id, err);
            return Ok(None);
        }

        info!(
            "Retrying meeting {} with UUID: {}",
            recording.id, recording.uuid
        );

        match self.fetch_report(&recording.uuid, cancel).await {
            Ok(report) => Ok(Some(report)),
            Err(err) if err.is_request_failure() => {
                warn!(
                    "Failed to get report for meeting {} using both ID and UUID",
                    recording.id
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch_report(
        &self,
        meeting: &str,
        cancel: &CancellationToken,
    ) -> Result<MeetingReport> {
        let path = format!("report/meetings/{}", meeting_segment(meeting)?);
        let value = cancellable(cancel, self.api.get(&path, &[])).await?;

        Ok(serde_json::from_value(value)?)
    }
}
