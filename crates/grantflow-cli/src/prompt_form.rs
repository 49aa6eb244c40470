//! Questionnaire-to-instruction rendering.
//!
//! The expert fills a small TOML questionnaire (contest notes, decision
//! criteria, red flags, special instructions); rendering produces the
//! single instruction string sent with an upload. The output-format block
//! is fixed so model answers stay machine-postprocessable.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Fixed output-format contract appended to every rendered instruction.
const OUTPUT_FORMAT: &str = "\
Return the answer STRICTLY in this format:
1) Short summary (5-7 bullet points)
2) Whether the project follows the submission guidelines given to you earlier (yes/no + explanation). Point out exactly where it deviates, if anywhere.
3) Strengths (3-5 bullet points)
4) Risks / red flags (3-5 bullet points)
5) Answers to the expert's criteria - ALWAYS as a table that converts cleanly to Markdown:
The table MUST be valid Markdown with no blank lines inside:
| Criterion | Score | Justification |
| --- | --- | --- |
IMPORTANT:
- Each table row on its own line
- No line breaks inside cells
- Separate arguments with a semicolon and a space (; )
- Use ONLY the Markdown table format, nothing else
6) Recommendation (support / reject / revise) + why";

/// Expert questionnaire loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptForm {
    /// What matters in this contest, free text
    #[serde(default)]
    pub contest_notes: String,

    /// Criteria the expert decides by, one entry per criterion
    #[serde(default)]
    pub criteria: Vec<String>,

    /// Red flags to watch for
    #[serde(default)]
    pub red_flags: Vec<String>,

    /// Anything else the expert wants the model to do
    #[serde(default)]
    pub special_instructions: String,
}

impl PromptForm {
    /// Load a questionnaire from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Render the questionnaire into the instruction string.
    pub fn render(&self) -> String {
        format!(
            "You are helping an expert evaluate grant applications.\n\
             \n\
             Contest context (what matters, in brief):\n{}\n\
             \n\
             Criteria the expert decides by:\n{}\n\
             \n\
             Red flags (if any):\n{}\n\
             \n\
             Special instructions from the expert:\n{}\n\
             \n\
             {}",
            self.contest_notes.trim(),
            bullet_list(&self.criteria),
            bullet_list(&self.red_flags),
            self.special_instructions.trim(),
            OUTPUT_FORMAT,
        )
    }
}

/// Render entries as a bullet list, skipping blanks; a placeholder marks an
/// empty list so the model is not left guessing.
fn bullet_list(entries: &[String]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| format!("- {}", e))
        .collect();

    if lines.is_empty() {
        "- (not specified)".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_all_sections() {
        let form = PromptForm {
            contest_notes: "Early-stage deep tech.".to_string(),
            criteria: vec!["Technical feasibility".to_string(), "Team".to_string()],
            red_flags: vec!["No budget".to_string()],
            special_instructions: "Be strict about budgets.".to_string(),
        };

        let rendered = form.render();
        assert!(rendered.contains("Early-stage deep tech."));
        assert!(rendered.contains("- Technical feasibility"));
        assert!(rendered.contains("- Team"));
        assert!(rendered.contains("- No budget"));
        assert!(rendered.contains("Be strict about budgets."));
        assert!(rendered.contains("STRICTLY"));
        assert!(rendered.contains("| Criterion | Score | Justification |"));
    }

    #[test]
    fn test_empty_lists_get_placeholder() {
        let form = PromptForm::default();
        let rendered = form.render();
        assert!(rendered.contains("- (not specified)"));
    }

    #[test]
    fn test_blank_entries_skipped() {
        let form = PromptForm {
            criteria: vec!["  ".to_string(), "Impact".to_string(), String::new()],
            ..PromptForm::default()
        };
        assert_eq!(bullet_list(&form.criteria), "- Impact");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            contest_notes = "Regional innovation fund."
            criteria = ["Feasibility", "Novelty"]
            red_flags = ["Vague milestones"]
            special_instructions = "Answer in English."
        "#;
        let form: PromptForm = toml::from_str(toml).unwrap();
        assert_eq!(form.criteria.len(), 2);
        assert!(form.render().contains("Regional innovation fund."));
    }
}
