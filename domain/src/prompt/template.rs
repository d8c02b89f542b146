//! Prompt templates for standard chat and round table runs

/// System prompt used when neither the session nor the prompt store supplies one
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Explain in depth.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// The session system prompt, or the built-in default when blank
    pub fn base_system(system: &str) -> &str {
        if system.trim().is_empty() {
            DEFAULT_SYSTEM_PROMPT
        } else {
            system
        }
    }

    /// System prompt for a round table participant
    pub fn participant_system(base: &str) -> String {
        format!(
            "{}\n\nYou are participating in a round table discussion with other AI models. \
Provide your perspective on the user's query. Contributions from other participants \
appear prefixed with their name in square brackets.",
            Self::base_system(base)
        )
    }

    /// System prompt for the chairman
    pub fn chairman_system(base: &str) -> String {
        format!(
            "{}\n\nYou are the chairman of a round table discussion. Review the perspectives \
from other AI models and provide a comprehensive summary that highlights key insights, \
areas of agreement and disagreement, and your own judgment on the matter.",
            Self::base_system(base)
        )
    }

    /// Final user message handed to the chairman: the replies of the round
    pub fn chairman_context(responses: &[(String, String)]) -> String {
        let mut prompt =
            String::from("Here are the responses from the round table participants:\n\n");
        for (name, content) in responses {
            prompt.push_str(&format!("=== {} ===\n{}\n\n", name, content));
        }
        prompt.push_str(
            "Please synthesize these perspectives and provide your final summary as the chairman.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_system_falls_back_to_default() {
        assert_eq!(PromptTemplate::base_system("  "), DEFAULT_SYSTEM_PROMPT);
        assert_eq!(PromptTemplate::base_system("Be brief."), "Be brief.");
    }

    #[test]
    fn test_participant_system_extends_base() {
        let prompt = PromptTemplate::participant_system("Be brief.");
        assert!(prompt.starts_with("Be brief.\n\n"));
        assert!(prompt.contains("round table discussion"));
    }

    #[test]
    fn test_chairman_context_lists_every_response() {
        let responses = vec![
            ("Claude".to_string(), "Answer one".to_string()),
            ("GPT".to_string(), "Answer two".to_string()),
        ];
        let prompt = PromptTemplate::chairman_context(&responses);
        assert!(prompt.contains("=== Claude ===\nAnswer one"));
        assert!(prompt.contains("=== GPT ===\nAnswer two"));
        assert!(prompt.ends_with("final summary as the chairman."));
    }
}
