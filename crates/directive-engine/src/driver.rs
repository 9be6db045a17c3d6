//! Applies message triggers as the conversation grows.
//!
//! The evaluator is stateless and recomputes identical results for an
//! unchanged count. The driver remembers the last count it applied so
//! repeated message events (edits, swipes, re-renders) do no redundant work.
//! Debouncing bursts of events is left to the host.

use directive_models::TriggerReport;
use tracing::{debug, info, warn};

use crate::engine::DirectiveEngine;
use crate::error::Result;
use crate::host::{MessageCounter, PromptSource, ToggleSink};

/// Stateful wrapper around trigger evaluation for one conversation.
#[derive(Debug, Clone, Default)]
pub struct TriggerDriver {
    last_count: Option<u32>,
}

impl TriggerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver that treats `count` as already applied.
    pub fn starting_at(count: u32) -> Self {
        Self {
            last_count: Some(count),
        }
    }

    /// The last message count whose transitions were applied.
    pub fn last_count(&self) -> Option<u32> {
        self.last_count
    }

    /// Forgets the last count, e.g. when the host switches conversations.
    pub fn reset(&mut self) {
        self.last_count = None;
    }

    /// Evaluates and applies triggers for the host's current message count.
    ///
    /// Returns `None` when the count is unchanged since the last call or the
    /// host cannot supply its state. Enables are applied before disables.
    pub fn on_message<H>(
        &mut self,
        engine: &DirectiveEngine,
        host: &mut H,
    ) -> Result<Option<TriggerReport>>
    where
        H: PromptSource + ToggleSink + MessageCounter + ?Sized,
    {
        let count = match host.current_message_count() {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Message count unavailable, skipping triggers");
                return Ok(None);
            }
        };

        if self.last_count == Some(count) {
            debug!(count, "Message count unchanged, skipping triggers");
            return Ok(None);
        }

        let prompts = match host.list_prompts() {
            Ok(prompts) => prompts,
            Err(e) => {
                warn!(error = %e, "Prompt set unavailable, skipping triggers");
                return Ok(None);
            }
        };

        let report = engine.evaluate_triggers(count, &prompts);
        for id in &report.to_enable {
            host.set_enabled(id, true)?;
        }
        for id in &report.to_disable {
            host.set_enabled(id, false)?;
        }
        for entry in &report.triggered {
            info!(
                prompt_id = %entry.id,
                action = %entry.action,
                reason = %entry.reason,
                "Message trigger fired"
            );
        }

        self.last_count = Some(count);
        Ok(Some(report))
    }
}
