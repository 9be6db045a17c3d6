//! Interfaces the engine consumes from its host.
//!
//! The host owns prompt storage, persistence, rendering and the chat log.
//! The engine reads prompts through [`PromptSource`], writes toggles through
//! [`ToggleSink`], asks a human through [`ResolutionPrompt`] and reads the
//! conversation length through [`MessageCounter`].

use directive_models::{Issue, Prompt, PromptRef};

use crate::error::HostError;

/// Supplies the live prompt set.
pub trait PromptSource {
    /// Returns every prompt with its current enabled state.
    fn list_prompts(&self) -> Result<Vec<Prompt>, HostError>;
}

/// Applies and persists enable/disable changes.
pub trait ToggleSink {
    fn set_enabled(&mut self, identifier: &str, enabled: bool) -> Result<(), HostError>;
}

/// Supplies the current conversation length.
pub trait MessageCounter {
    fn current_message_count(&self) -> Result<u32, HostError>;
}

/// A human's answer to a list of issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Enable anyway.
    Proceed,
    /// Leave the prompt disabled.
    Cancel,
}

/// Interactive fallback when issues cannot be auto-resolved.
pub trait ResolutionPrompt {
    fn confirm(&mut self, prompt: &PromptRef, issues: &[Issue]) -> Resolution;
}

impl<F> ResolutionPrompt for F
where
    F: FnMut(&PromptRef, &[Issue]) -> Resolution,
{
    fn confirm(&mut self, prompt: &PromptRef, issues: &[Issue]) -> Resolution {
        self(prompt, issues)
    }
}

/// A host that keeps everything in memory.
///
/// Useful for embedding the engine without a storage layer and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    pub prompts: Vec<Prompt>,
    pub message_count: u32,
    /// Every toggle applied, in order.
    pub toggles: Vec<(String, bool)>,
}

impl InMemoryHost {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts,
            ..Self::default()
        }
    }

    /// Sets the message count.
    pub fn with_message_count(mut self, count: u32) -> Self {
        self.message_count = count;
        self
    }

    /// Returns the enabled flag of `identifier`, if present.
    pub fn is_enabled(&self, identifier: &str) -> Option<bool> {
        self.prompts
            .iter()
            .find(|p| p.identifier == identifier)
            .map(|p| p.enabled)
    }
}

impl PromptSource for InMemoryHost {
    fn list_prompts(&self) -> Result<Vec<Prompt>, HostError> {
        Ok(self.prompts.clone())
    }
}

impl ToggleSink for InMemoryHost {
    fn set_enabled(&mut self, identifier: &str, enabled: bool) -> Result<(), HostError> {
        let prompt = self
            .prompts
            .iter_mut()
            .find(|p| p.identifier == identifier)
            .ok_or_else(|| HostError::UnknownPrompt(identifier.to_string()))?;
        prompt.enabled = enabled;
        self.toggles.push((identifier.to_string(), enabled));
        Ok(())
    }
}

impl MessageCounter for InMemoryHost {
    fn current_message_count(&self) -> Result<u32, HostError> {
        Ok(self.message_count)
    }
}
