//! The parsed directive record for one prompt body.
//!
//! A `DirectiveSet` is a pure function of the content it was parsed from.
//! Every list defaults to empty and every scalar to `None`/`false`; directives
//! only ever overlay values onto that zero record.

use serde::{Deserialize, Serialize};

/// Inclusive message window for `@message-range`.
///
/// `end == None` means the window never closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRange {
    /// First message count inside the window.
    pub start: u32,
    /// Last message count inside the window, or open-ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl MessageRange {
    /// Creates a closed window `start..=end`.
    pub fn closed(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Creates a window that stays open after `start`.
    pub fn open(start: u32) -> Self {
        Self { start, end: None }
    }

    /// Returns true if `count` falls inside the window.
    pub fn contains(&self, count: u32) -> bool {
        count >= self.start && self.end.map_or(true, |end| count <= end)
    }
}

impl std::fmt::Display for MessageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-", self.start),
        }
    }
}

/// Metadata, constraints and triggers declared inside a prompt body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectiveSet {
    // Identity and help
    /// Short hover text.
    pub tooltip: Option<String>,
    /// Longer help text.
    pub help: Option<String>,
    /// Documentation link.
    pub docs: Option<String>,
    /// Author credit.
    pub author: Option<String>,
    /// Prompt version string.
    pub version: Option<String>,
    /// Usage examples, in declaration order.
    pub examples: Vec<String>,
    /// Changelog entries, in declaration order.
    pub changelog: Vec<String>,
    /// Deprecation notice; presence marks the prompt deprecated.
    pub deprecated: Option<String>,

    // Relationship constraints
    /// Prompts that must be enabled alongside this one.
    pub requires: Vec<String>,
    /// Prompts that can never be enabled together with this one.
    pub exclusive_with: Vec<String>,
    /// Prompts that only warn when enabled together with this one.
    pub conflicts_with: Vec<String>,
    /// At most one enabled prompt per group value.
    pub mutual_exclusive_group: Option<String>,
    /// Category in which this prompt tolerates no other enabled member.
    pub max_one_per_category: Option<String>,
    /// Categories this prompt belongs to.
    pub categories: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,

    // Auto-behavior
    /// Prompts this one may switch off to resolve conflicts.
    pub auto_disable: Vec<String>,
    /// Whether missing requirements may be switched on automatically.
    pub auto_enable_dependencies: bool,

    // Visibility conditions
    /// Shown only while all of these are enabled.
    pub if_enabled: Vec<String>,
    /// Shown only while all of these are disabled.
    pub if_disabled: Vec<String>,
    /// Shown only when the active API is one of these.
    pub if_api: Vec<String>,
    /// Never shown.
    pub hidden: bool,

    // Presentation
    pub icon: Option<String>,
    pub color: Option<String>,
    pub badge: Option<String>,
    pub highlight: bool,
    pub group: Option<String>,
    pub group_description: Option<String>,

    // Message triggers
    /// Enable once the conversation reaches this many messages.
    pub enable_at_message: Option<u32>,
    /// Disable once the conversation reaches this many messages.
    pub disable_at_message: Option<u32>,
    /// Keep enabled exactly while the message count is inside this window.
    pub message_range: Option<MessageRange>,
    /// Enable once the conversation has moved past this many messages.
    pub enable_after_message: Option<u32>,
    /// Disable once the conversation has moved past this many messages.
    pub disable_after_message: Option<u32>,
}

impl DirectiveSet {
    /// Returns true if no directive changed any field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if any message-count trigger is declared.
    pub fn has_triggers(&self) -> bool {
        self.enable_at_message.is_some()
            || self.disable_at_message.is_some()
            || self.message_range.is_some()
            || self.enable_after_message.is_some()
            || self.disable_after_message.is_some()
    }

    /// Returns true if any relationship constraint is declared.
    pub fn has_constraints(&self) -> bool {
        !self.requires.is_empty()
            || !self.exclusive_with.is_empty()
            || !self.conflicts_with.is_empty()
            || self.mutual_exclusive_group.is_some()
            || self.max_one_per_category.is_some()
    }

    /// Returns true if this prompt may switch `identifier` off on activation.
    pub fn may_auto_disable(&self, identifier: &str) -> bool {
        self.auto_disable.iter().any(|id| id == identifier)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
