//! Display conditions: `@hidden`, `@if-enabled`, `@if-disabled`, `@if-api`.

use directive_models::{find_prompt, DirectiveSet, Prompt};

/// Returns true if a prompt with `directives` should be shown.
///
/// All conditions must hold:
/// - not `@hidden`
/// - every `@if-enabled` id is present and enabled
/// - every `@if-disabled` id is absent or disabled
/// - `@if-api`, when given, lists `active_api`
pub fn is_visible(directives: &DirectiveSet, prompts: &[Prompt], active_api: Option<&str>) -> bool {
    if directives.hidden {
        return false;
    }

    let enabled = |id: &String| find_prompt(prompts, id).is_some_and(|p| p.enabled);

    if !directives.if_enabled.iter().all(enabled) {
        return false;
    }
    if directives.if_disabled.iter().any(enabled) {
        return false;
    }

    if !directives.if_api.is_empty() {
        let Some(api) = active_api else {
            return false;
        };
        if !directives.if_api.iter().any(|a| a.eq_ignore_ascii_case(api)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn prompts() -> Vec<Prompt> {
        vec![
            Prompt::new("on", "On", "").with_enabled(true),
            Prompt::new("off", "Off", ""),
        ]
    }

    #[test]
    fn test_no_conditions_is_visible() {
        assert!(is_visible(&DirectiveSet::default(), &prompts(), None));
    }

    #[test]
    fn test_hidden() {
        assert!(!is_visible(&parse("{{// @hidden}}"), &prompts(), None));
    }

    #[test]
    fn test_if_enabled() {
        assert!(is_visible(&parse("{{// @if-enabled on}}"), &prompts(), None));
        assert!(!is_visible(&parse("{{// @if-enabled on, off}}"), &prompts(), None));
        assert!(!is_visible(&parse("{{// @if-enabled ghost}}"), &prompts(), None));
    }

    #[test]
    fn test_if_disabled() {
        assert!(is_visible(&parse("{{// @if-disabled off, ghost}}"), &prompts(), None));
        assert!(!is_visible(&parse("{{// @if-disabled on}}"), &prompts(), None));
    }

    #[test]
    fn test_if_api() {
        let set = parse("{{// @if-api openai, claude}}");
        assert!(is_visible(&set, &prompts(), Some("claude")));
        assert!(is_visible(&set, &prompts(), Some("OpenAI")));
        assert!(!is_visible(&set, &prompts(), Some("mistral")));
        assert!(!is_visible(&set, &prompts(), None));
    }
}
