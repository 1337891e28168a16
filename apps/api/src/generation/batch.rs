//! Batch orchestration — one sequential pass over the valid timeline entries.

use thiserror::Error;
use tracing::{info, warn};

use crate::gemini::{ContentGenerator, GenerationError};
use crate::models::experience::{ExperienceEntry, GeneratedResult};

#[derive(Debug, Error)]
pub enum BatchError {
    /// Nothing submittable; reported before any network activity.
    #[error("no valid entries: company, role, and start date are required")]
    NoValidEntries,

    /// The first failure encountered; the rest of the batch was abandoned.
    #[error("generation failed for {company}: {source}")]
    EntryFailed {
        company: String,
        #[source]
        source: GenerationError,
    },
}

impl BatchError {
    /// The one message shown to the user. The cause goes to the logs.
    pub fn user_message(&self) -> String {
        match self {
            BatchError::NoValidEntries => {
                "Please enter at least a company, role, and start date.".to_string()
            }
            BatchError::EntryFailed { .. } => {
                "Failed to generate content. Please ensure your API key and endpoint are valid."
                    .to_string()
            }
        }
    }
}

/// Runs the generator over every valid entry, strictly one call at a time.
///
/// Calls are sequential to keep upstream request volume and rate-limit
/// exposure predictable. The first failure abandons the remaining entries and
/// discards prior successes; the caller never sees a partial list. Results
/// come back in filtered-input order, and re-invoking with the same input
/// starts a fresh batch.
pub async fn generate_all(
    generator: &dyn ContentGenerator,
    entries: &[ExperienceEntry],
) -> Result<Vec<GeneratedResult>, BatchError> {
    let valid: Vec<&ExperienceEntry> = entries.iter().filter(|e| e.is_valid()).collect();
    if valid.is_empty() {
        return Err(BatchError::NoValidEntries);
    }

    info!(
        "starting generation batch: {} of {} entries valid",
        valid.len(),
        entries.len()
    );

    let mut results = Vec::with_capacity(valid.len());
    for entry in valid {
        match generator.generate(entry).await {
            Ok(result) => results.push(result),
            Err(source) => {
                warn!("abandoning batch at '{}': {source}", entry.company);
                return Err(BatchError::EntryFailed {
                    company: entry.company.clone(),
                    source,
                });
            }
        }
    }

    info!("generation batch completed: {} results", results.len());
    Ok(results)
}
