use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-submitted job-history record on the career timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    /// Per-entry tone/format override. Collected by the form; not yet folded
    /// into the prompt.
    pub generation_instructions: String,
}

impl ExperienceEntry {
    /// A fresh empty entry, ready for the user to fill in.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            generation_instructions: String::new(),
        }
    }

    /// An entry is submitted to generation only when company, role, and
    /// start date are all present. Description and instructions are optional.
    pub fn is_valid(&self) -> bool {
        !self.company.trim().is_empty()
            && !self.role.trim().is_empty()
            && !self.start_date.trim().is_empty()
    }
}

/// A web citation the upstream service claims backs its generated claims.
/// The full title and uri are retained here; truncation for display is the
/// UI's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSource {
    pub title: String,
    pub uri: String,
}

/// Generated content for one experience entry. Built exactly once per
/// successful call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResult {
    /// Back-reference to the entry this was generated from.
    pub experience_id: Uuid,
    pub company: String,
    pub role: String,
    pub bullet_points: Vec<String>,
    pub context_sources: Vec<ContextSource>,
    /// Short narrative of what the company was focused on during the tenure.
    pub roadmap_context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_entry() -> ExperienceEntry {
        ExperienceEntry {
            company: "Stripe".to_string(),
            role: "Backend Engineer".to_string(),
            start_date: "2019".to_string(),
            end_date: "2022".to_string(),
            ..ExperienceEntry::blank()
        }
    }

    #[test]
    fn test_blank_entry_is_not_valid() {
        assert!(!ExperienceEntry::blank().is_valid());
    }

    #[test]
    fn test_entry_with_company_role_and_start_is_valid() {
        let entry = filled_entry();
        assert!(entry.is_valid());
        assert!(entry.description.is_empty(), "description stays optional");
        assert!(entry.generation_instructions.is_empty());
    }

    #[test]
    fn test_missing_any_required_field_invalidates() {
        let mut entry = filled_entry();
        entry.company = "  ".to_string();
        assert!(!entry.is_valid());

        let mut entry = filled_entry();
        entry.role = String::new();
        assert!(!entry.is_valid());

        let mut entry = filled_entry();
        entry.start_date = String::new();
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_missing_end_date_does_not_invalidate() {
        let mut entry = filled_entry();
        entry.end_date = String::new();
        assert!(entry.is_valid());
    }

    #[test]
    fn test_generated_result_wire_shape_is_camel_case() {
        let result = GeneratedResult {
            experience_id: Uuid::new_v4(),
            company: "Stripe".to_string(),
            role: "Backend Engineer".to_string(),
            bullet_points: vec!["Shipped payment links".to_string()],
            context_sources: vec![ContextSource {
                title: "Stripe newsroom".to_string(),
                uri: "https://stripe.com/newsroom".to_string(),
            }],
            roadmap_context: "Expanding no-code checkout".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("bulletPoints").is_some());
        assert!(json.get("roadmapContext").is_some());
        assert!(json.get("experienceId").is_some());
        assert!(json.get("contextSources").is_some());
    }
}
