//! Zoom cloud recording client.
//!
//! Layers, leaf-first:
//! - [`oauth`]: account-credential token exchange and caching
//! - [`client`]: authenticated requests against the REST API
//! - [`discovery`]: 30-day window scan over a user's recordings
//! - [`course_filter`]: report lookup and Canvas course matching
//! - [`transcript`]: transcript download and caption parsing

pub mod client;
pub mod course_filter;
pub mod discovery;
pub mod error;
pub mod models;
pub mod oauth;
pub mod transcript;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{meeting_segment, path_segment, ZoomApi, ZoomClient};
pub use course_filter::CourseFilter;
pub use discovery::{Discovery, RecordingDiscoverer};
pub use error::{Result, ZoomError};
pub use models::{
    CaptionRecord, DateWindow, FileType, MeetingReport, ProviderCredentials, RecordingFile,
    RecordingSummary, Transcript,
};
pub use oauth::{AccessToken, TokenProvider};
pub use transcript::{TranscriptFetcher, TranscriptMessages, TranscriptOutcome};
