//! Axum route handlers for the career timeline.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::experience::ExperienceEntry;
use crate::state::AppState;
use crate::timeline::store::{ExperienceUpdate, TimelineError};

#[derive(Debug, Serialize)]
pub struct ExperienceListResponse {
    pub experiences: Vec<ExperienceEntry>,
}

fn map_timeline_error(err: TimelineError) -> AppError {
    match err {
        TimelineError::NotFound(id) => AppError::NotFound(format!("Experience {id} not found")),
        TimelineError::LastEntry => {
            AppError::Validation("At least one position must remain on the timeline".to_string())
        }
    }
}

/// GET /api/v1/experiences
pub async fn handle_list_experiences(
    State(state): State<AppState>,
) -> Json<ExperienceListResponse> {
    let experiences = state.timeline.read().await.entries();
    Json(ExperienceListResponse { experiences })
}

/// POST /api/v1/experiences
///
/// Appends a blank entry for the user to fill in.
pub async fn handle_add_experience(State(state): State<AppState>) -> Json<ExperienceEntry> {
    let entry = state.timeline.write().await.add();
    Json(entry)
}

/// PATCH /api/v1/experiences/:id
///
/// Partial field update; absent fields are left untouched.
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ExperienceUpdate>,
) -> Result<Json<ExperienceEntry>, AppError> {
    let entry = state
        .timeline
        .write()
        .await
        .update(id, update)
        .map_err(map_timeline_error)?;
    Ok(Json(entry))
}

/// DELETE /api/v1/experiences/:id
///
/// The timeline never drops below one entry.
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExperienceListResponse>, AppError> {
    let mut timeline = state.timeline.write().await;
    timeline.remove(id).map_err(map_timeline_error)?;
    Ok(Json(ExperienceListResponse {
        experiences: timeline.entries(),
    }))
}
