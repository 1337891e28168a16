// Prompt constants for the research-and-draft call.

use crate::models::experience::ExperienceEntry;

/// Substituted when the user left the description blank.
pub const NO_DESCRIPTION_FALLBACK: &str =
    "None provided. Research the company's state and projects from scratch.";

/// Generation prompt template. Replace `{company}`, `{role}`, `{start_date}`,
/// `{end_date}`, and `{description}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Analyze this career experience and perform deep research using web search.

Company: {company}
Role: {role}
Period: {start_date} to {end_date}
User's basic input: {description}

CRITICAL INSTRUCTIONS:
1. Research actual high-impact projects, product launches, architectural shifts, or business milestones {company} was undergoing between {start_date} and {end_date}.
2. Even if the user provided NO description, construct 4 high-impact resume bullet points (STAR method) as if the user was a top-performing {role} contributing to these real-world events.
3. Use specific terminology, tools, and project names found in your research (e.g., "Contributed to the launch of [Actual Project Name]", "Helped scale [Actual Service] during [Actual Event]").
4. Ensure the bullet points are metric-driven and highly professional.
5. Provide a brief "Roadmap Context" explaining what the company was focused on during this tenure (e.g., "During this time, {company} was pivoting to AI-first services and expanding into the APAC market").

Format the output as a valid JSON object with these keys:
- bulletPoints: string[]
- roadmapContext: string"#;

/// Fills the generation template for one experience entry.
///
/// `generation_instructions` is not interpolated yet. The form already
/// collects it as a per-entry tone/format override, reserved for a future
/// prompt revision.
pub fn build_generation_prompt(entry: &ExperienceEntry) -> String {
    let description = if entry.description.trim().is_empty() {
        NO_DESCRIPTION_FALLBACK
    } else {
        entry.description.as_str()
    };

    GENERATION_PROMPT_TEMPLATE
        .replace("{company}", &entry.company)
        .replace("{role}", &entry.role)
        .replace("{start_date}", &entry.start_date)
        .replace("{end_date}", &entry.end_date)
        .replace("{description}", description)
}
