//! Prompt assembly for the evaluation call
//!
//! Every task sends the same three-message shape: a system directive
//! (optionally extended with organization guidelines), the extracted
//! document text, and the expert's instruction.

use grantflow_domain::ChatMessage;

/// Fixed system directive for every evaluation
pub const SYSTEM_DIRECTIVE: &str = "You are an assistant that answers based on the text of a \
PDF grant application. Be brief and to the point.";

/// Builds the three-message conversation for one document
pub struct PromptBuilder {
    pdf_text: String,
    instruction: String,
    guidelines: Option<String>,
}

impl PromptBuilder {
    /// Create a builder from extracted text and the user instruction
    pub fn new(pdf_text: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            pdf_text: pdf_text.into(),
            instruction: instruction.into(),
            guidelines: None,
        }
    }

    /// Extend the system directive with organization guideline text
    ///
    /// Empty guideline text is treated as absent.
    pub fn with_guidelines(mut self, guidelines: impl Into<String>) -> Self {
        let guidelines = guidelines.into();
        if !guidelines.trim().is_empty() {
            self.guidelines = Some(guidelines);
        }
        self
    }

    /// Whether the built prompt will carry a guideline block
    pub fn has_guidelines(&self) -> bool {
        self.guidelines.is_some()
    }

    /// Build the ordered message sequence
    pub fn build(&self) -> Vec<ChatMessage> {
        let system = match &self.guidelines {
            Some(guidelines) => format!(
                "{}\n\nSubmission guidelines the application must follow:\n{}",
                SYSTEM_DIRECTIVE, guidelines
            ),
            None => SYSTEM_DIRECTIVE.to_string(),
        };

        vec![
            ChatMessage::system(system),
            ChatMessage::user(format!("PDF text:\n{}", self.pdf_text)),
            ChatMessage::user(format!("User instruction: {}", self.instruction)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantflow_domain::ChatRole;

    #[test]
    fn test_three_message_shape() {
        let messages = PromptBuilder::new("doc text", "Summarize").build();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].role, ChatRole::User);
        assert_eq!(messages[0].content, SYSTEM_DIRECTIVE);
        assert_eq!(messages[1].content, "PDF text:\ndoc text");
        assert_eq!(messages[2].content, "User instruction: Summarize");
    }

    #[test]
    fn test_guidelines_extend_system_message() {
        let builder =
            PromptBuilder::new("doc", "Evaluate").with_guidelines("Applications need a budget.");
        assert!(builder.has_guidelines());

        let messages = builder.build();
        assert!(messages[0].content.starts_with(SYSTEM_DIRECTIVE));
        assert!(messages[0].content.contains("Applications need a budget."));
    }

    #[test]
    fn test_empty_guidelines_are_absent() {
        let builder = PromptBuilder::new("doc", "Evaluate").with_guidelines("  \n ");
        assert!(!builder.has_guidelines());
        assert_eq!(builder.build()[0].content, SYSTEM_DIRECTIVE);
    }
}
