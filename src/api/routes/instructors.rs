//! Instructor API routes.

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::recordings::InstructorRecordings;
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

/// Query parameters for instructor recordings.
#[derive(Debug, Deserialize, Default)]
pub struct InstructorQueryParams {
    /// Canvas course ID to filter by
    pub course_id: Option<String>,
}

/// Create the instructors router.
pub fn router() -> Router<AppState> {
    Router::new().route("/instructors/:id/recordings", get(instructor_recordings))
}

/// GET /instructors/:id/recordings - Recordings hosted by an instructor.
async fn instructor_recordings(
    State(state): State<AppState>,
    Path(instructor_id): Path<String>,
    Query(params): Query<InstructorQueryParams>,
) -> ApiResult<Json<InstructorRecordings>> {
    let cancel = state.shutdown.child_token();
    let recordings = state
        .service
        .get_instructor_recordings(&instructor_id, params.course_id.as_deref(), &cancel)
        .await?;
    Ok(Json(recordings))
}
