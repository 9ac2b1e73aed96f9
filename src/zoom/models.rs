//! Zoom API payload types and the date windows used to scan them.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tracking field that carries the Canvas course ID on a meeting report.
pub const COURSE_TRACKING_FIELD: &str = "Canvas Course";

/// Length of each recording-list query window.
pub const WINDOW_DAYS: i64 = 30;

/// Credentials for the client-credential grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Type of a file attached to a cloud recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    Mp4,
    M4a,
    Transcript,
    Chat,
    Cc,
    Csv,
    Timeline,
    Summary,
    #[serde(other)]
    Unknown,
}

impl FileType {
    /// Types kept when a recording is projected for the LMS.
    pub fn is_lms_visible(&self) -> bool {
        matches!(self, Self::Mp4 | Self::Transcript)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "unknown_file_type")]
    pub file_type: FileType,
    #[serde(default)]
    pub recording_type: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

fn unknown_file_type() -> FileType {
    FileType::Unknown
}

/// One cloud-recorded meeting as returned by the recording list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSummary {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
}

impl RecordingSummary {
    pub fn transcript_file(&self) -> Option<&RecordingFile> {
        self.recording_files
            .iter()
            .find(|f| f.file_type == FileType::Transcript)
    }

    /// Copy with the file list reduced to MP4 and transcript files.
    pub fn lms_view(&self) -> Self {
        Self {
            recording_files: self
                .recording_files
                .iter()
                .filter(|f| f.file_type.is_lms_visible())
                .cloned()
                .collect(),
            ..self.clone()
        }
    }
}

/// Body of `users/{id}/recordings`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordingList {
    #[serde(default)]
    pub meetings: Vec<RecordingSummary>,
}

/// Body of `users/{id}`; only the canonical ID is needed.
#[derive(Debug, Deserialize)]
pub struct ZoomUser {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingField {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

impl TrackingField {
    /// Value rendered as a string; numbers keep their JSON spelling.
    pub fn value_string(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of `report/meetings/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct MeetingReport {
    #[serde(default)]
    pub tracking_fields: Vec<TrackingField>,
}

impl MeetingReport {
    /// Value of the Canvas course tracking field, if present.
    pub fn course_id(&self) -> Option<String> {
        self.tracking_fields
            .iter()
            .find(|f| f.field == COURSE_TRACKING_FIELD)
            .map(TrackingField::value_string)
    }
}

/// A single caption cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub index: String,
    pub start: String,
    pub end: String,
    pub text: String,
}

pub type Transcript = Vec<CaptionRecord>;

/// Inclusive date range for one recording-list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Windows walking backward from `now` until the cursor passes the epoch.
    pub fn backward_from(now: NaiveDateTime) -> impl Iterator<Item = DateWindow> {
        let epoch = scan_epoch();
        let step = Duration::days(WINDOW_DAYS);

        std::iter::successors(Some(now), move |cursor| cursor.checked_sub_signed(step))
            .take_while(move |cursor| *cursor >= epoch)
            .map(move |cursor| DateWindow {
                start: (cursor - step).date(),
                end: cursor.date(),
            })
    }

    pub fn from_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn to_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Earliest instant the window scan reaches back to.
pub fn scan_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}
