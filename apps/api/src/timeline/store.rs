//! In-memory store backing the career timeline form.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::experience::ExperienceEntry;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("experience {0} not found")]
    NotFound(Uuid),

    #[error("the timeline must keep at least one entry")]
    LastEntry,
}

/// Partial field update for one entry. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub role: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub generation_instructions: Option<String>,
}

/// Mutable list of entries. At least one entry always exists; the store is
/// seeded with a single blank entry.
#[derive(Debug)]
pub struct TimelineStore {
    entries: Vec<ExperienceEntry>,
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self {
            entries: vec![ExperienceEntry::blank()],
        }
    }
}

impl TimelineStore {
    pub fn entries(&self) -> Vec<ExperienceEntry> {
        self.entries.clone()
    }

    /// Appends a blank entry and returns it.
    pub fn add(&mut self) -> ExperienceEntry {
        let entry = ExperienceEntry::blank();
        self.entries.push(entry.clone());
        entry
    }

    /// Applies a partial update in place and returns the updated entry.
    pub fn update(
        &mut self,
        id: Uuid,
        update: ExperienceUpdate,
    ) -> Result<ExperienceEntry, TimelineError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(TimelineError::NotFound(id))?;

        if let Some(company) = update.company {
            entry.company = company;
        }
        if let Some(role) = update.role {
            entry.role = role;
        }
        if let Some(start_date) = update.start_date {
            entry.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            entry.end_date = end_date;
        }
        if let Some(description) = update.description {
            entry.description = description;
        }
        if let Some(instructions) = update.generation_instructions {
            entry.generation_instructions = instructions;
        }

        Ok(entry.clone())
    }

    /// Removes an entry. Refused at the one-entry floor.
    pub fn remove(&mut self, id: Uuid) -> Result<(), TimelineError> {
        if self.entries.len() == 1 {
            return Err(TimelineError::LastEntry);
        }
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(TimelineError::NotFound(id))?;
        self.entries.remove(position);
        Ok(())
    }
}
