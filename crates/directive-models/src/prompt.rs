//! Prompt types as supplied by the host.
//!
//! The directive engine never creates or deletes prompts; it only reads
//! them and asks the host to flip their enabled flag.

use serde::{Deserialize, Serialize};

/// Role a prompt is injected with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptRole {
    /// System-level instruction.
    #[default]
    System,
    /// Injected as a user turn.
    User,
    /// Injected as an assistant turn.
    Assistant,
}

/// A named prompt unit owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique, stable identifier.
    pub identifier: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Raw prompt body; may carry `{{// @keyword ...}}` directive blocks.
    #[serde(default)]
    pub content: String,

    /// Whether the prompt is currently enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Injection role.
    #[serde(default)]
    pub role: PromptRole,
}

impl Prompt {
    /// Creates a disabled system prompt.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            content: content.into(),
            enabled: false,
            role: PromptRole::default(),
        }
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: PromptRole) -> Self {
        self.role = role;
        self
    }

    /// Returns true if the prompt has any content to parse.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Name for messages, falling back to the identifier when unnamed.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.identifier
        } else {
            &self.name
        }
    }
}

/// Finds a prompt by identifier.
pub fn find_prompt<'a>(prompts: &'a [Prompt], identifier: &str) -> Option<&'a Prompt> {
    prompts.iter().find(|p| p.identifier == identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_identifier() {
        let named = Prompt::new("p1", "Pacing", "");
        let unnamed = Prompt::new("p2", "  ", "");

        assert_eq!(named.display_name(), "Pacing");
        assert_eq!(unnamed.display_name(), "p2");
    }

    #[test]
    fn test_has_content() {
        assert!(!Prompt::new("p1", "A", "").has_content());
        assert!(!Prompt::new("p1", "A", " \n ").has_content());
        assert!(Prompt::new("p1", "A", "text").has_content());
    }

    #[test]
    fn test_prompt_deserialize_defaults() {
        let prompt: Prompt = serde_json::from_str(r#"{"identifier":"main"}"#).unwrap();

        assert_eq!(prompt.identifier, "main");
        assert!(!prompt.enabled);
        assert_eq!(prompt.role, PromptRole::System);
        assert!(prompt.content.is_empty());
    }

    #[test]
    fn test_role_serialization() {
        let prompt = Prompt::new("p", "P", "").with_role(PromptRole::Assistant);
        let json = serde_json::to_string(&prompt).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn test_find_prompt() {
        let prompts = vec![Prompt::new("a", "A", ""), Prompt::new("b", "B", "")];
        assert_eq!(find_prompt(&prompts, "b").map(|p| p.name.as_str()), Some("B"));
        assert!(find_prompt(&prompts, "c").is_none());
    }
}
