//! JSON prompt-set store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directive_engine::{HostError, MessageCounter, PromptSource, ToggleSink};
use directive_models::Prompt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::atomic::{read_json, write_json};
use crate::error::{Result, StoreError};

/// On-disk shape of a prompt set.
///
/// ```text
/// {
///   "message_count": 12,
///   "updated_at": "2026-01-29T10:00:00Z",
///   "prompts": [
///     { "identifier": "...", "name": "...", "content": "...", "enabled": true, "role": "system" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptSetDocument {
    /// Messages in the current conversation.
    #[serde(default)]
    pub message_count: u32,

    /// When the document was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

impl PromptSetDocument {
    /// Fails on duplicate identifiers.
    fn check_identifiers(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for prompt in &self.prompts {
            if !seen.insert(prompt.identifier.as_str()) {
                return Err(StoreError::DuplicateIdentifier(prompt.identifier.clone()));
            }
        }
        Ok(())
    }
}

/// A prompt set backed by one JSON file.
///
/// Mutations are persisted immediately.
#[derive(Debug)]
pub struct PromptStore {
    path: PathBuf,
    document: PromptSetDocument,
}

impl PromptStore {
    /// Opens the document at `path`; a missing file is an empty set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document: PromptSetDocument = read_json(&path)?.unwrap_or_default();
        document.check_identifiers()?;
        debug!(path = %path.display(), prompts = document.prompts.len(), "Opened prompt set");
        Ok(Self { path, document })
    }

    /// Creates a store at `path` holding `prompts`, writing it out.
    pub fn create(path: impl Into<PathBuf>, prompts: Vec<Prompt>) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            document: PromptSetDocument {
                prompts,
                ..PromptSetDocument::default()
            },
        };
        store.document.check_identifiers()?;
        store.save()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &PromptSetDocument {
        &self.document
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.document.prompts
    }

    /// Looks up a prompt by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Prompt> {
        self.document.prompts.iter().find(|p| p.identifier == identifier)
    }

    /// Writes the document atomically.
    pub fn save(&mut self) -> Result<()> {
        self.document.updated_at = Some(Utc::now());
        write_json(&self.path, &self.document)
    }

    /// Inserts or replaces a prompt by identifier and saves.
    pub fn upsert(&mut self, prompt: Prompt) -> Result<()> {
        match self
            .document
            .prompts
            .iter_mut()
            .find(|p| p.identifier == prompt.identifier)
        {
            Some(existing) => *existing = prompt,
            None => self.document.prompts.push(prompt),
        }
        self.save()
    }

    /// Sets a prompt's enabled flag and saves.
    pub fn set_prompt_enabled(&mut self, identifier: &str, enabled: bool) -> Result<()> {
        let prompt = self
            .document
            .prompts
            .iter_mut()
            .find(|p| p.identifier == identifier)
            .ok_or_else(|| StoreError::PromptNotFound(identifier.to_string()))?;
        if prompt.enabled == enabled {
            return Ok(());
        }
        prompt.enabled = enabled;
        debug!(prompt_id = %identifier, enabled, "Toggled prompt");
        self.save()
    }

    pub fn message_count(&self) -> u32 {
        self.document.message_count
    }

    /// Sets the message count and saves.
    pub fn set_message_count(&mut self, count: u32) -> Result<()> {
        self.document.message_count = count;
        self.save()
    }

    /// Adds `by` messages to the count and saves, returning the new count.
    pub fn advance_messages(&mut self, by: u32) -> Result<u32> {
        self.document.message_count = self.document.message_count.saturating_add(by);
        self.save()?;
        Ok(self.document.message_count)
    }
}

impl PromptSource for PromptStore {
    fn list_prompts(&self) -> std::result::Result<Vec<Prompt>, HostError> {
        Ok(self.document.prompts.clone())
    }
}

impl ToggleSink for PromptStore {
    fn set_enabled(
        &mut self,
        identifier: &str,
        enabled: bool,
    ) -> std::result::Result<(), HostError> {
        self.set_prompt_enabled(identifier, enabled).map_err(HostError::from)
    }
}

impl MessageCounter for PromptStore {
    fn current_message_count(&self) -> std::result::Result<u32, HostError> {
        Ok(self.document.message_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directive_engine::{activate, ActivationOutcome, DirectiveEngine, Resolution, TriggerDriver};
    use directive_models::{Issue, PromptRef};
    use tempfile::tempdir;

    fn sample() -> Vec<Prompt> {
        vec![
            Prompt::new(
                "slow",
                "Slow pacing",
                "{{// @category pacing}}{{// @max-one-per-category pacing}}\
                 {{// @auto-disable fast}}",
            ),
            Prompt::new("fast", "Fast pacing", "{{// @category pacing}}").with_enabled(true),
            Prompt::new("late", "Late twist", "{{// @enable-at-message 10}}"),
        ]
    }

    fn cancel(_: &PromptRef, _: &[Issue]) -> Resolution {
        Resolution::Cancel
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = PromptStore::open(dir.path().join("prompts.json")).unwrap();
        assert!(store.prompts().is_empty());
        assert_eq!(store.message_count(), 0);
    }

    #[test]
    fn test_create_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");

        PromptStore::create(&path, sample()).unwrap();
        let store = PromptStore::open(&path).unwrap();

        assert_eq!(store.prompts().len(), 3);
        assert!(store.document().updated_at.is_some());
        assert_eq!(store.get("fast").map(|p| p.enabled), Some(true));
    }

    #[test]
    fn test_duplicate_identifiers_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        let prompts = vec![Prompt::new("a", "A", ""), Prompt::new("a", "A2", "")];

        let err = PromptStore::create(&path, prompts).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateIdentifier(id) if id == "a"));
    }

    #[test]
    fn test_toggle_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        let mut store = PromptStore::create(&path, sample()).unwrap();

        store.set_enabled("late", true).unwrap();

        let reopened = PromptStore::open(&path).unwrap();
        assert_eq!(reopened.get("late").map(|p| p.enabled), Some(true));
    }

    #[test]
    fn test_toggle_unknown_prompt() {
        let dir = tempdir().unwrap();
        let mut store = PromptStore::create(dir.path().join("p.json"), sample()).unwrap();

        let err = store.set_enabled("ghost", true).unwrap_err();
        assert!(matches!(err, HostError::UnknownPrompt(id) if id == "ghost"));
    }

    #[test]
    fn test_upsert() {
        let dir = tempdir().unwrap();
        let mut store = PromptStore::create(dir.path().join("p.json"), sample()).unwrap();

        store.upsert(Prompt::new("late", "Later twist", "")).unwrap();
        store.upsert(Prompt::new("new", "New", "")).unwrap();

        assert_eq!(store.prompts().len(), 4);
        assert_eq!(store.get("late").map(|p| p.name.as_str()), Some("Later twist"));
    }

    #[test]
    fn test_activation_auto_resolves_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        let mut store = PromptStore::create(&path, sample()).unwrap();
        let engine = DirectiveEngine::default();

        let outcome = activate(&engine, &mut store, &mut cancel, "slow").unwrap();
        assert!(matches!(outcome, ActivationOutcome::AutoResolved(_)));

        let reopened = PromptStore::open(&path).unwrap();
        assert_eq!(reopened.get("slow").map(|p| p.enabled), Some(true));
        assert_eq!(reopened.get("fast").map(|p| p.enabled), Some(false));
    }

    #[test]
    fn test_advance_drives_triggers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        let mut store = PromptStore::create(&path, sample()).unwrap();
        let engine = DirectiveEngine::default();
        let mut driver = TriggerDriver::new();

        assert_eq!(store.advance_messages(9).unwrap(), 9);
        let report = driver.on_message(&engine, &mut store).unwrap().unwrap();
        assert!(report.is_empty());

        store.advance_messages(1).unwrap();
        let report = driver.on_message(&engine, &mut store).unwrap().unwrap();
        assert_eq!(report.to_enable, vec!["late"]);

        let reopened = PromptStore::open(&path).unwrap();
        assert_eq!(reopened.message_count(), 10);
        assert_eq!(reopened.get("late").map(|p| p.enabled), Some(true));
    }
}
