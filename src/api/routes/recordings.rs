//! Recording API routes.

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::zoom::TranscriptOutcome;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

/// Create the recordings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/recordings/:id/transcript", get(recording_transcript))
}

/// GET /recordings/:id/transcript - Parsed transcript for a recording.
async fn recording_transcript(
    State(state): State<AppState>,
    Path(recording_id): Path<String>,
) -> ApiResult<Json<TranscriptOutcome>> {
    let outcome = state.service.get_recording_transcript(&recording_id).await?;
    Ok(Json(outcome))
}
