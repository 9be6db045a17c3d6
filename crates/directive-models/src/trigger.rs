//! Result types for message-count trigger evaluation.

use serde::{Deserialize, Serialize};

/// Direction of a triggered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAction {
    Enable,
    Disable,
}

impl std::fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerAction::Enable => f.write_str("enable"),
            TriggerAction::Disable => f.write_str("disable"),
        }
    }
}

/// Audit entry describing why a prompt was flagged for a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredPrompt {
    pub id: String,
    pub name: String,
    pub action: TriggerAction,
    /// Human-readable rule that fired, e.g. `message count 10 >= 10`.
    pub reason: String,
}

/// Transitions computed for one message count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReport {
    /// Message count the report was computed for.
    pub message_count: u32,
    /// Prompts to switch on, in prompt-set order.
    pub to_enable: Vec<String>,
    /// Prompts to switch off, in prompt-set order.
    pub to_disable: Vec<String>,
    /// One entry per fired rule.
    pub triggered: Vec<TriggeredPrompt>,
}

impl TriggerReport {
    /// An empty report for `message_count`.
    pub fn empty(message_count: u32) -> Self {
        Self {
            message_count,
            ..Self::default()
        }
    }

    /// Returns true if no transition was requested.
    pub fn is_empty(&self) -> bool {
        self.to_enable.is_empty() && self.to_disable.is_empty()
    }

    /// Records a fired rule, keeping each id at most once per list.
    pub fn push(&mut self, entry: TriggeredPrompt) {
        let list = match entry.action {
            TriggerAction::Enable => &mut self.to_enable,
            TriggerAction::Disable => &mut self.to_disable,
        };
        if !list.contains(&entry.id) {
            list.push(entry.id.clone());
        }
        self.triggered.push(entry);
    }
}
