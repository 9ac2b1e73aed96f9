//! Meeting API routes.

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::zoom::TranscriptOutcome;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;

/// Create the meetings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meetings/:id/recordings", get(meeting_recordings))
        .route("/meetings/:id/transcript", get(meeting_transcript))
}

/// GET /meetings/:id/recordings - Zoom's recording payload for a meeting.
async fn meeting_recordings(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let recordings = state.service.get_meeting_recordings(&meeting_id).await?;
    Ok(Json(recordings))
}

/// GET /meetings/:id/transcript - Parsed transcript for a meeting.
async fn meeting_transcript(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> ApiResult<Json<TranscriptOutcome>> {
    let outcome = state.service.get_meeting_transcript(&meeting_id).await?;
    Ok(Json(outcome))
}
