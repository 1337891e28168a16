//! Session state — the one place batch results live between requests.
//!
//! Results are only ever replaced wholesale, on completion or error; nothing
//! appends to them mid-batch. `reset` discards everything and returns the
//! session to the editable form.

use serde::Serialize;

use crate::models::experience::GeneratedResult;

/// Lifecycle of the current session, mirroring the four screens of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStatus {
    #[default]
    Idle,
    Researching,
    Completed,
    Error,
}

#[derive(Debug, Default)]
pub struct Session {
    status: AppStatus,
    results: Vec<GeneratedResult>,
    error: Option<String>,
}

impl Session {
    /// Marks a batch as in flight, clearing any previous outcome.
    pub fn begin(&mut self) {
        self.status = AppStatus::Researching;
        self.results.clear();
        self.error = None;
    }

    /// Publishes a completed batch, replacing the results wholesale.
    pub fn complete(&mut self, results: Vec<GeneratedResult>) {
        self.status = AppStatus::Completed;
        self.results = results;
        self.error = None;
    }

    /// Records a failed batch. Prior successes from the same batch are gone.
    pub fn fail(&mut self, message: String) {
        self.status = AppStatus::Error;
        self.results.clear();
        self.error = Some(message);
    }

    pub fn reset(&mut self) {
        *self = Session::default();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status,
            results: self.results.clone(),
            error: self.error.clone(),
        }
    }
}

/// Serializable snapshot of the session for the UI.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub status: AppStatus,
    pub results: Vec<GeneratedResult>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn result() -> GeneratedResult {
        GeneratedResult {
            experience_id: Uuid::new_v4(),
            company: "Vercel".to_string(),
            role: "Frontend Engineer".to_string(),
            bullet_points: vec!["Shipped".to_string()],
            context_sources: Vec::new(),
            roadmap_context: "Edge-first".to_string(),
        }
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut session = Session::default();
        session.complete(vec![result()]);

        session.begin();
        let view = session.view();
        assert_eq!(view.status, AppStatus::Researching);
        assert!(view.results.is_empty());
        assert!(view.error.is_none());
    }

    #[test]
    fn test_fail_discards_results_and_carries_message() {
        let mut session = Session::default();
        session.complete(vec![result()]);

        session.fail("something broke".to_string());
        let view = session.view();
        assert_eq!(view.status, AppStatus::Error);
        assert!(view.results.is_empty());
        assert_eq!(view.error.as_deref(), Some("something broke"));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = Session::default();
        session.fail("oops".to_string());

        session.reset();
        let view = session.view();
        assert_eq!(view.status, AppStatus::Idle);
        assert!(view.results.is_empty());
        assert!(view.error.is_none());
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_value(AppStatus::Researching).unwrap();
        assert_eq!(json, "RESEARCHING");
    }
}
