//! Core data models for prompt directives.
//!
//! This crate provides the plain data types shared by the directive engine,
//! the prompt-set store and the CLI: prompts as the host owns them, the
//! parsed directive record, validation issues and trigger reports.

pub mod directives;
pub mod issue;
pub mod prompt;
pub mod trigger;

// Re-export main types
pub use directives::{DirectiveSet, MessageRange};
pub use issue::{Issue, IssueType, PromptRef, Severity};
pub use prompt::{find_prompt, Prompt, PromptRole};
pub use trigger::{TriggerAction, TriggerReport, TriggeredPrompt};
