//! Gemini client — the single point of entry for all generation calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the generation endpoint
//! directly. All upstream interactions MUST go through this module.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::experience::{ExperienceEntry, GeneratedResult};

pub mod normalize;
pub mod prompts;

/// Default generation endpoint. Override with `GEMINI_API_URL`.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";
/// Fixed low for reproducible drafts.
const TEMPERATURE: f32 = 0.0;
const MAX_OUTPUT_TOKENS: u32 = 1024;
/// Per-call ceiling. Research-backed generations routinely take tens of
/// seconds; anything past this is treated as a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Placeholder narrative when the model omitted `roadmapContext`.
const ROADMAP_PLACEHOLDER: &str = "Researching roadmap...";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response text was not a bulletPoints/roadmapContext object: {0}")]
    Contract(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    prompt: PromptPart<'a>,
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct PromptPart<'a> {
    text: &'a str,
}

/// Seam between the batch loop and the network. Production wires
/// [`GeminiClient`]; tests script the results.
#[async_trait::async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, entry: &ExperienceEntry)
        -> Result<GeneratedResult, GenerationError>;
}

/// HTTP client for the generation endpoint. Configuration is injected at
/// startup; nothing here reads the environment.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            api_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gemini_api_key.clone(), config.gemini_api_url.clone())
    }
}

#[async_trait::async_trait]
impl ContentGenerator for GeminiClient {
    /// Runs one research-and-draft call for a single experience entry.
    ///
    /// An empty API key fails here, before any network activity. A non-2xx
    /// status reads the error body best-effort and carries the status code.
    /// No call is ever retried automatically; retry is a fresh batch.
    async fn generate(
        &self,
        entry: &ExperienceEntry,
    ) -> Result<GeneratedResult, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let prompt = prompts::build_generation_prompt(entry);
        let request_body = GenerateContentRequest {
            prompt: PromptPart { text: &prompt },
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };

        debug!(company = %entry.company, "sending generation request");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: Value = response.json().await?;
        assemble_result(entry, &raw)
    }
}

/// Normalizes a decoded response body into a [`GeneratedResult`].
///
/// Missing `bulletPoints` / `roadmapContext` fall back to defaults (the
/// degraded-success path); a text payload that is not the requested JSON
/// object is a contract violation.
fn assemble_result(
    entry: &ExperienceEntry,
    raw: &Value,
) -> Result<GeneratedResult, GenerationError> {
    let text = normalize::extract_text(raw);
    let payload = normalize::parse_payload(&text)?;
    let context_sources = normalize::extract_sources(raw);

    debug!(
        company = %entry.company,
        bullets = payload.bullet_points.len(),
        sources = context_sources.len(),
        "generation response normalized"
    );

    Ok(GeneratedResult {
        experience_id: entry.id,
        company: entry.company.clone(),
        role: entry.role.clone(),
        bullet_points: payload.bullet_points,
        context_sources,
        roadmap_context: payload
            .roadmap_context
            .unwrap_or_else(|| ROADMAP_PLACEHOLDER.to_string()),
    })
}
