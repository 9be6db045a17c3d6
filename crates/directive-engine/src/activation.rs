//! The enable flow a host runs when a user switches a prompt on.
//!
//! Validation, auto-resolution and the interactive fallback run in sequence,
//! with the activating toggle committed last. State lives only in the prompt
//! set, so a flow interrupted between steps can be re-derived by validating
//! again.

use directive_models::{find_prompt, PromptRef};
use tracing::{info, warn};

use crate::engine::DirectiveEngine;
use crate::error::{EngineError, Result};
use crate::host::{PromptSource, Resolution, ResolutionPrompt, ToggleSink};
use crate::resolution::ResolutionPlan;

/// How an enable request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Enabled with no issues, or validation could not run.
    Enabled,
    /// Already enabled; nothing changed.
    AlreadyEnabled,
    /// Issues were fixed silently before enabling.
    AutoResolved(ResolutionPlan),
    /// The user chose to enable despite the issues.
    Confirmed,
    /// The user cancelled; nothing changed.
    Cancelled,
}

impl ActivationOutcome {
    /// Returns true if the prompt ended up enabled.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ActivationOutcome::Cancelled)
    }
}

/// Enables `prompt_id`, validating first.
///
/// - Listing the prompt set fails: enable anyway rather than leave the user stuck.
/// - No issues: enable.
/// - Errors that the prompt's own directives can fix: fix, then enable.
/// - Anything else: ask `ui`; proceed enables, cancel changes nothing.
pub fn activate<H, U>(
    engine: &DirectiveEngine,
    host: &mut H,
    ui: &mut U,
    prompt_id: &str,
) -> Result<ActivationOutcome>
where
    H: PromptSource + ToggleSink + ?Sized,
    U: ResolutionPrompt + ?Sized,
{
    let prompts = match host.list_prompts() {
        Ok(prompts) => prompts,
        Err(e) => {
            warn!(prompt_id = %prompt_id, error = %e, "Validation unavailable, enabling anyway");
            host.set_enabled(prompt_id, true)?;
            return Ok(ActivationOutcome::Enabled);
        }
    };

    let current = find_prompt(&prompts, prompt_id)
        .ok_or_else(|| EngineError::PromptNotFound(prompt_id.to_string()))?;
    if current.enabled {
        return Ok(ActivationOutcome::AlreadyEnabled);
    }

    let issues = engine.validate(prompt_id, &prompts);
    if issues.is_empty() {
        host.set_enabled(prompt_id, true)?;
        return Ok(ActivationOutcome::Enabled);
    }

    if issues.iter().any(|i| i.is_error()) {
        if let Some(plan) = engine.resolution_plan(&issues, prompt_id, &prompts) {
            plan.apply(host)?;
            host.set_enabled(prompt_id, true)?;
            info!(
                prompt_id = %prompt_id,
                disabled = plan.to_disable.len(),
                enabled = plan.to_enable.len(),
                "Auto-resolved activation"
            );
            return Ok(ActivationOutcome::AutoResolved(plan));
        }
    }

    match ui.confirm(&PromptRef::from(current), &issues) {
        Resolution::Proceed => {
            host.set_enabled(prompt_id, true)?;
            info!(prompt_id = %prompt_id, issues = issues.len(), "Enabled despite issues");
            Ok(ActivationOutcome::Confirmed)
        }
        Resolution::Cancel => Ok(ActivationOutcome::Cancelled),
    }
}

/// Disables `prompt_id`. Switching a prompt off is never validated.
pub fn deactivate<H>(host: &mut H, prompt_id: &str) -> Result<()>
where
    H: ToggleSink + ?Sized,
{
    host.set_enabled(prompt_id, false)?;
    Ok(())
}
