// Batch generation — runs the research-and-draft call over the timeline.
// All upstream calls go through the gemini module — no direct reqwest here.

pub mod batch;
pub mod handlers;
