use std::sync::Arc;

use tokio::sync::RwLock;

use crate::gemini::ContentGenerator;
use crate::session::Session;
use crate::timeline::store::TimelineStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub timeline: Arc<RwLock<TimelineStore>>,
    /// Current batch outcome. Replaced wholesale; never appended mid-batch.
    pub session: Arc<RwLock<Session>>,
    /// Pluggable generator. Production wires GeminiClient; tests inject fakes.
    pub generator: Arc<dyn ContentGenerator>,
}
