//! Axum route handlers for generation and session state.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::batch::generate_all;
use crate::models::experience::{ExperienceEntry, GeneratedResult};
use crate::session::SessionView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub results: Vec<GeneratedResult>,
}

/// POST /api/v1/generate
///
/// Runs one batch over the current timeline: filters to valid entries, then
/// calls the generator one entry at a time and publishes the results
/// wholesale. The first failure abandons the batch and moves the session to
/// the error state.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let entries = state.timeline.read().await.entries();

    // User-input check before any session transition; a rejected submission
    // leaves the editing screen untouched.
    if !entries.iter().any(ExperienceEntry::is_valid) {
        return Err(AppError::Validation(
            "Please enter at least a company, role, and start date.".to_string(),
        ));
    }

    state.session.write().await.begin();

    match generate_all(state.generator.as_ref(), &entries).await {
        Ok(results) => {
            state.session.write().await.complete(results.clone());
            Ok(Json(GenerateResponse { results }))
        }
        Err(err) => {
            state.session.write().await.fail(err.user_message());
            Err(err.into())
        }
    }
}

/// GET /api/v1/session
pub async fn handle_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.read().await.view())
}

/// POST /api/v1/reset
///
/// Discards results and returns the session to the editable form.
pub async fn handle_reset(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.write().await;
    session.reset();
    Json(session.view())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;
    use crate::gemini::{ContentGenerator, GenerationError};
    use crate::session::{AppStatus, Session};
    use crate::timeline::store::{ExperienceUpdate, TimelineStore};

    /// Returns one canned result per entry, or a fixed error for every call.
    struct StubGenerator {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate(
            &self,
            entry: &ExperienceEntry,
        ) -> Result<GeneratedResult, GenerationError> {
            if self.fail {
                return Err(GenerationError::Api {
                    status: 429,
                    message: "rate limited".to_string(),
                });
            }
            Ok(GeneratedResult {
                experience_id: entry.id,
                company: entry.company.clone(),
                role: entry.role.clone(),
                bullet_points: vec!["bullet".to_string()],
                context_sources: Vec::new(),
                roadmap_context: "context".to_string(),
            })
        }
    }

    async fn app_state(fail: bool) -> AppState {
        let state = AppState {
            timeline: Arc::new(RwLock::new(TimelineStore::default())),
            session: Arc::new(RwLock::new(Session::default())),
            generator: Arc::new(StubGenerator { fail }),
        };
        let id = state.timeline.read().await.entries()[0].id;
        state
            .timeline
            .write()
            .await
            .update(
                id,
                ExperienceUpdate {
                    company: Some("Linear".to_string()),
                    role: Some("Engineer".to_string()),
                    start_date: Some("2022".to_string()),
                    ..ExperienceUpdate::default()
                },
            )
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_generate_publishes_results_and_completes_session() {
        let state = app_state(false).await;

        let response = handle_generate(State(state.clone())).await.unwrap();
        assert_eq!(response.0.results.len(), 1);

        let view = state.session.read().await.view();
        assert_eq!(view.status, AppStatus::Completed);
        assert_eq!(view.results, response.0.results);
    }

    #[tokio::test]
    async fn test_generate_failure_moves_session_to_error_with_no_results() {
        let state = app_state(true).await;

        assert!(handle_generate(State(state.clone())).await.is_err());

        let view = state.session.read().await.view();
        assert_eq!(view.status, AppStatus::Error);
        assert!(view.results.is_empty());
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn test_generate_with_no_valid_entries_leaves_session_idle() {
        let state = AppState {
            timeline: Arc::new(RwLock::new(TimelineStore::default())),
            session: Arc::new(RwLock::new(Session::default())),
            generator: Arc::new(StubGenerator { fail: false }),
        };

        assert!(handle_generate(State(state.clone())).await.is_err());
        let view = state.session.read().await.view();
        assert_eq!(view.status, AppStatus::Idle, "no partial state changes");
    }

    #[tokio::test]
    async fn test_reset_discards_completed_results() {
        let state = app_state(false).await;
        handle_generate(State(state.clone())).await.unwrap();

        let view = handle_reset(State(state.clone())).await.0;
        assert_eq!(view.status, AppStatus::Idle);
        assert!(view.results.is_empty());
    }
}
