//! Validation findings produced when a prompt is about to be enabled.

use serde::{Deserialize, Serialize};

use crate::prompt::Prompt;

/// Kind of validation finding.
///
/// Variant order is the emission order of the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    /// Hard mutual exclusion with an enabled prompt.
    Exclusive,
    /// A required prompt is absent or disabled.
    MissingDependency,
    /// Another enabled prompt shares a limited category.
    CategoryLimit,
    /// Another enabled prompt shares the mutual-exclusive group.
    MutualExclusiveGroup,
    /// Soft conflict with an enabled prompt.
    SoftConflict,
    /// The prompt is marked deprecated.
    Deprecated,
}

impl IssueType {
    /// Returns true for types that list conflicting prompts to switch off.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            IssueType::Exclusive | IssueType::CategoryLimit | IssueType::MutualExclusiveGroup
        )
    }

    /// Returns true for types that are merged when seen from both sides.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, IssueType::Exclusive | IssueType::SoftConflict)
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IssueType::Exclusive => "exclusive",
            IssueType::MissingDependency => "missing-dependency",
            IssueType::CategoryLimit => "category-limit",
            IssueType::MutualExclusiveGroup => "mutual-exclusive-group",
            IssueType::SoftConflict => "soft-conflict",
            IssueType::Deprecated => "deprecated",
        };
        f.write_str(s)
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the toggle unless resolved.
    Error,
    /// Informational; the user may proceed.
    Warning,
}

/// Lightweight reference to a prompt inside an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptRef {
    pub identifier: String,
    pub name: String,
}

impl PromptRef {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }

    /// Reference to a prompt that could not be found; the id doubles as name.
    pub fn unresolved(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
        }
    }
}

impl From<&Prompt> for PromptRef {
    fn from(prompt: &Prompt) -> Self {
        Self::new(prompt.identifier.clone(), prompt.display_name())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Kind of finding.
    #[serde(rename = "type")]
    pub issue_type: IssueType,

    pub severity: Severity,

    /// Human-readable description.
    pub message: String,

    /// The prompt being enabled.
    pub current_prompt: PromptRef,

    /// Single conflicting prompt, when exactly one is involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_prompt: Option<PromptRef>,

    /// All conflicting prompts, for grouped or merged findings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_prompts: Vec<PromptRef>,

    /// The missing requirement, when it exists in the prompt set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_prompt: Option<PromptRef>,

    /// Whether the activating prompt allows auto-enabling requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_auto_enable: Option<bool>,

    /// Directive keyword that produced the finding.
    pub directive: String,
}

impl Issue {
    /// Creates an issue with no prompt references besides the current one.
    pub fn new(
        issue_type: IssueType,
        severity: Severity,
        current_prompt: PromptRef,
        message: impl Into<String>,
        directive: impl Into<String>,
    ) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
            current_prompt,
            conflicting_prompt: None,
            conflicting_prompts: Vec::new(),
            required_prompt: None,
            can_auto_enable: None,
            directive: directive.into(),
        }
    }

    /// Sets the single conflicting prompt.
    pub fn with_conflicting_prompt(mut self, prompt: PromptRef) -> Self {
        self.conflicting_prompt = Some(prompt);
        self
    }

    /// Sets the list of conflicting prompts.
    pub fn with_conflicting_prompts(mut self, prompts: Vec<PromptRef>) -> Self {
        self.conflicting_prompts = prompts;
        self
    }

    /// Sets the required prompt reference.
    pub fn with_required_prompt(mut self, prompt: Option<PromptRef>) -> Self {
        self.required_prompt = prompt;
        self
    }

    /// Sets the auto-enable flag.
    pub fn with_can_auto_enable(mut self, can: bool) -> Self {
        self.can_auto_enable = Some(can);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Every conflicting prompt referenced, singular and listed, without repeats.
    pub fn conflicting(&self) -> Vec<&PromptRef> {
        let mut out: Vec<&PromptRef> = Vec::new();
        for prompt in self.conflicting_prompt.iter().chain(&self.conflicting_prompts) {
            if !out.iter().any(|p| p.identifier == prompt.identifier) {
                out.push(prompt);
            }
        }
        out
    }

    /// Returns true if this issue names `identifier` as a conflicting prompt.
    pub fn references(&self, identifier: &str) -> bool {
        self.conflicting().iter().any(|p| p.identifier == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> PromptRef {
        PromptRef::new("a", "Prompt A")
    }

    #[test]
    fn test_conflicting_merges_singular_and_list() {
        let issue = Issue::new(
            IssueType::Exclusive,
            Severity::Error,
            current(),
            "m",
            "@exclusive-with",
        )
        .with_conflicting_prompt(PromptRef::new("b", "B"))
        .with_conflicting_prompts(vec![PromptRef::new("b", "B"), PromptRef::new("c", "C")]);

        let ids: Vec<_> = issue.conflicting().iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert!(issue.references("c"));
        assert!(!issue.references("a"));
    }

    #[test]
    fn test_issue_type_classes() {
        assert!(IssueType::Exclusive.is_conflict());
        assert!(IssueType::CategoryLimit.is_conflict());
        assert!(!IssueType::MissingDependency.is_conflict());
        assert!(IssueType::SoftConflict.is_symmetric());
        assert!(!IssueType::MutualExclusiveGroup.is_symmetric());
    }

    #[test]
    fn test_issue_serialization_shape() {
        let issue = Issue::new(
            IssueType::MissingDependency,
            Severity::Error,
            current(),
            "needs x",
            "@requires",
        )
        .with_can_auto_enable(false);

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "missing-dependency");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["can_auto_enable"], false);
        assert!(json.get("conflicting_prompts").is_none());
    }

    #[test]
    fn test_unresolved_ref_uses_id_as_name() {
        let r = PromptRef::unresolved("ghost");
        assert_eq!(r.name, "ghost");
        assert_eq!(r.identifier, "ghost");
    }
}
