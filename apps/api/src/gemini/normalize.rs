//! Response normalization for the generation endpoint.
//!
//! The upstream response body varies by API version. Text extraction runs a
//! fixed priority list of named shape matchers over the decoded body; the
//! first matcher yielding non-empty text wins. Grounding citations are pulled
//! from the two locations observed in the wild.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::models::experience::ContextSource;

/// Title used when a grounding chunk carries no web title.
const FALLBACK_SOURCE_TITLE: &str = "Related Source";
/// Placeholder uri for a grounding chunk with no link.
const FALLBACK_SOURCE_URI: &str = "#";

/// The JSON object the model is instructed to produce inside its text reply.
///
/// Both keys are optional; the caller fills degraded-success defaults.
/// Unknown keys are rejected so that a serialized raw body (the extraction
/// fallback) surfaces as a contract violation instead of an empty result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerationPayload {
    #[serde(default)]
    pub bullet_points: Vec<String>,
    #[serde(default)]
    pub roadmap_context: Option<String>,
}

type ShapeMatcher = fn(&Value) -> Option<String>;

/// Known response shapes, in priority order.
const TEXT_MATCHERS: &[(&str, ShapeMatcher)] = &[
    ("output_content", output_content_text),
    ("candidate_parts", candidate_parts_text),
    ("flat_output_text", flat_output_text),
    ("flat_text", flat_text),
];

/// Extracts the model's generated text from a decoded response body.
///
/// When no matcher applies, the whole body is re-serialized; that string then
/// fails strict payload parsing, which is how an unrecognized response
/// surfaces as a diagnosable error rather than a silent empty result.
pub fn extract_text(raw: &Value) -> String {
    for (name, matcher) in TEXT_MATCHERS {
        if let Some(text) = matcher(raw) {
            if !text.trim().is_empty() {
                debug!("response text matched shape '{name}'");
                return text;
            }
        }
    }
    raw.to_string()
}

/// `output[*].content[*]` item marked as text.
fn output_content_text(raw: &Value) -> Option<String> {
    let items = raw.get("output")?.as_array()?;
    for item in items {
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for block in content {
            let block_type = block.get("type").and_then(Value::as_str).unwrap_or_default();
            if block_type == "text" || block_type == "output_text" {
                if let Some(text) = block.get("text").and_then(Value::as_str) {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

/// `candidates[0].content.parts[*].text`, concatenated.
fn candidate_parts_text(raw: &Value) -> Option<String> {
    let parts = raw
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn flat_output_text(raw: &Value) -> Option<String> {
    raw.get("outputText").and_then(Value::as_str).map(str::to_string)
}

fn flat_text(raw: &Value) -> Option<String> {
    raw.get("text").and_then(Value::as_str).map(str::to_string)
}

/// Parses extracted text as a generation payload. The error here is the
/// "transport succeeded but the payload was not the expected JSON" case.
pub fn parse_payload(text: &str) -> Result<GenerationPayload, serde_json::Error> {
    serde_json::from_str(strip_json_fences(text))
}

/// Strips ```json ... ``` or ``` ... ``` code fences if the model wraps its
/// JSON reply in them.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Collects grounding citations from either known location in the body.
/// Missing or malformed citation lists normalize to an empty list, never an
/// error.
pub fn extract_sources(raw: &Value) -> Vec<ContextSource> {
    let Some(chunks) = candidate_grounding_chunks(raw).or_else(|| output_grounding_chunks(raw))
    else {
        return Vec::new();
    };

    chunks
        .iter()
        .filter_map(|chunk| {
            let web = chunk.get("web")?;
            Some(ContextSource {
                title: web
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(FALLBACK_SOURCE_TITLE)
                    .to_string(),
                uri: web
                    .get("uri")
                    .and_then(Value::as_str)
                    .unwrap_or(FALLBACK_SOURCE_URI)
                    .to_string(),
            })
        })
        .collect()
}

/// `candidates[0].groundingMetadata.groundingChunks`
fn candidate_grounding_chunks(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("candidates")?
        .get(0)?
        .get("groundingMetadata")?
        .get("groundingChunks")?
        .as_array()
}

/// `output[*].groundingMetadata.groundingChunks`
fn output_grounding_chunks(raw: &Value) -> Option<&Vec<Value>> {
    let items = raw.get("output")?.as_array()?;
    items
        .iter()
        .find_map(|item| item.get("groundingMetadata")?.get("groundingChunks")?.as_array())
}
