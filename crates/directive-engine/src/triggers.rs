//! Message-count triggers.
//!
//! Every rule is level-triggered and guarded by the prompt's current state,
//! so evaluating the same count twice yields the same transitions and a rule
//! stops firing as soon as the host has applied it:
//!
//! - `@enable-at-message N`: enable while disabled and count >= N
//! - `@disable-at-message N`: disable while enabled and count >= N
//! - `@message-range S-E`: enabled exactly while S <= count <= E
//! - `@enable-after-message N`: enable while disabled and count > N
//! - `@disable-after-message N`: disable while enabled and count > N
//!
//! The "at" and "after" pairs differ only in the threshold: "at" fires on
//! message N itself, "after" on the first message past N. Both keep
//! re-asserting their state for the rest of the conversation.

use directive_models::{DirectiveSet, Prompt, TriggerAction, TriggerReport, TriggeredPrompt};

use crate::cache::DirectiveCache;

/// Computes the transitions due at `message_count`.
///
/// Every rule is guarded by the prompt's current state, so enable rules only
/// fire for disabled prompts and disable rules only for enabled ones. A
/// prompt therefore lands in at most one list. Nothing is applied here.
pub fn evaluate(cache: &DirectiveCache, message_count: u32, prompts: &[Prompt]) -> TriggerReport {
    let mut report = TriggerReport::empty(message_count);

    for prompt in prompts.iter().filter(|p| p.has_content()) {
        let directives = cache.get(&prompt.content);
        if directives.has_triggers() {
            evaluate_prompt(prompt, &directives, message_count, &mut report);
        }
    }

    report
}

fn evaluate_prompt(
    prompt: &Prompt,
    directives: &DirectiveSet,
    count: u32,
    report: &mut TriggerReport,
) {
    let mut fire = |action: TriggerAction, reason: String| {
        report.push(TriggeredPrompt {
            id: prompt.identifier.clone(),
            name: prompt.display_name().to_string(),
            action,
            reason,
        });
    };

    if let Some(n) = directives.enable_at_message {
        if !prompt.enabled && count >= n {
            let reason = format!("@enable-at-message {n}: count {count} >= {n}");
            fire(TriggerAction::Enable, reason);
        }
    }

    if let Some(n) = directives.disable_at_message {
        if prompt.enabled && count >= n {
            let reason = format!("@disable-at-message {n}: count {count} >= {n}");
            fire(TriggerAction::Disable, reason);
        }
    }

    if let Some(range) = directives.message_range {
        let inside = range.contains(count);
        if inside && !prompt.enabled {
            let reason = format!("@message-range {range}: count {count} inside");
            fire(TriggerAction::Enable, reason);
        } else if !inside && prompt.enabled {
            let reason = format!("@message-range {range}: count {count} outside");
            fire(TriggerAction::Disable, reason);
        }
    }

    if let Some(n) = directives.enable_after_message {
        if !prompt.enabled && count > n {
            let reason = format!("@enable-after-message {n}: count {count} > {n}");
            fire(TriggerAction::Enable, reason);
        }
    }

    if let Some(n) = directives.disable_after_message {
        if prompt.enabled && count > n {
            let reason = format!("@disable-after-message {n}: count {count} > {n}");
            fire(TriggerAction::Disable, reason);
        }
    }
}
