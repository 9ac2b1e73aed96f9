//! Recording discovery across Zoom's date-bounded list endpoint.
//!
//! `users/{id}/recordings` only answers for a bounded date range, so the
//! scan walks backward from today in 30-day windows until 2020-01-01.
//! Instructors arrive from the LMS as an email or login ID; when Zoom does
//! not recognise it, the identifier is resolved to the Zoom user ID once
//! and the scan continues with that ID.

use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::client::{path_segment, ZoomApi};
use super::error::{Result, ZoomError};
use super::models::{DateWindow, RecordingList, RecordingSummary, ZoomUser};

/// Recordings per window; anything beyond this in one window is not fetched.
pub const PAGE_SIZE: u32 = 300;

#[derive(Debug, Clone, PartialEq)]
pub enum Discovery {
    Found(Vec<RecordingSummary>),
    /// The identifier could not be resolved to a Zoom user.
    UserNotFound,
}

pub struct RecordingDiscoverer<'a, A: ZoomApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ZoomApi + ?Sized> RecordingDiscoverer<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn discover(
        &self,
        identifier: &str,
        cancel: &CancellationToken,
    ) -> Result<Discovery> {
        self.discover_at(identifier, chrono::Local::now().naive_local(), cancel)
            .await
    }

    pub async fn discover_at(
        &self,
        identifier: &str,
        now: NaiveDateTime,
        cancel: &CancellationToken,
    ) -> Result<Discovery> {
        let mut user_id = identifier.to_string();
        let mut resolved = false;
        let mut recordings = Vec::new();

        for window in DateWindow::backward_from(now) {
            if cancel.is_cancelled() {
                return Err(ZoomError::Cancelled);
            }

            match cancellable(cancel, self.list_window(&user_id, &window)).await {
                Ok(found) => recordings.extend(found),
                Err(err) if err.is_not_found() => {
                    if resolved {
                        warn!("Resolved Zoom user {} no longer found", user_id);
                        return Ok(Discovery::UserNotFound);
                    }

                    match self.resolve_and_list(identifier, &window, cancel).await? {
                        Some((id, found)) => {
                            info!("Found {} recordings using resolved user ID", found.len());
                            recordings.extend(found);
                            user_id = id;
                            resolved = true;
                        }
                        None => {
                            warn!("No Zoom user found for identifier: {}", identifier);
                            return Ok(Discovery::UserNotFound);
                        }
                    }
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Total recordings found for {}: {}",
            identifier,
            recordings.len()
        );
        Ok(Discovery::Found(recordings))
    }

    async fn list_window(
        &self,
        user_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<RecordingSummary>> {
        let query = [
            ("page_size", PAGE_SIZE.to_string()),
            ("from", window.from_param()),
            ("to", window.to_param()),
        ];

        let path = format!("users/{}/recordings", path_segment(user_id)?);
        let value = self.api.get(&path, &query).await?;
        let list: RecordingList = serde_json::from_value(value)?;

        debug!(
            "Found {} recordings for date range {} to {}",
            list.meetings.len(),
            window.from_param(),
            window.to_param()
        );
        Ok(list.meetings)
    }

    /// Resolve `identifier` to a Zoom user ID and retry `window` with it.
    ///
    /// `Ok(None)` means the user could not be resolved.
    async fn resolve_and_list(
        &self,
        identifier: &str,
        window: &DateWindow,
        cancel: &CancellationToken,
    ) -> Result<Option<(String, Vec<RecordingSummary>)>> {
        let path = format!("users/{}", path_segment(identifier)?);
        let user = match cancellable(cancel, self.api.get(&path, &[])).await {
            Ok(value) => serde_json::from_value::<ZoomUser>(value)?,
            Err(ZoomError::Http { .. }) => return Ok(None),
            Err(err) => return Err(err),
        };

        let Some(user_id) = user.id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        info!("Retrying with resolved user ID: {}", user_id);

        match cancellable(cancel, self.list_window(&user_id, window)).await {
            Ok(found) => Ok(Some((user_id, found))),
            Err(ZoomError::Http { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Race `fut` against cancellation.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ZoomError::Cancelled),
        res = fut => res,
    }
}
