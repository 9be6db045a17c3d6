//! The engine facade tying parser, cache and decision modules together.

use std::sync::Arc;

use directive_models::{find_prompt, DirectiveSet, Issue, Prompt, TriggerReport};
use tracing::{debug, warn};

use crate::cache::{CacheStats, DirectiveCache};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::host::{MessageCounter, PromptSource, ToggleSink};
use crate::parser::{self, ParseOutcome};
use crate::resolution::ResolutionPlan;
use crate::{triggers, validation, visibility};

/// Directive engine over one prompt set.
///
/// Holds the directive cache; every other call is a pure function of its
/// inputs. Entry points are synchronous and expect to run to completion one
/// at a time.
#[derive(Debug)]
pub struct DirectiveEngine {
    config: EngineConfig,
    cache: DirectiveCache,
}

impl Default for DirectiveEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DirectiveEngine {
    /// Creates an engine with its own cache sized from `config`.
    pub fn new(config: EngineConfig) -> Self {
        let cache = DirectiveCache::new(config.cache_capacity, config.cache_ttl);
        Self { config, cache }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses `content` without touching the cache.
    pub fn parse(&self, content: &str) -> DirectiveSet {
        parser::parse(content)
    }

    /// Parses `content`, also returning unrecognised directive lines.
    pub fn parse_with_diagnostics(&self, content: &str) -> ParseOutcome {
        parser::parse_with_diagnostics(content)
    }

    /// Cached directives for `content`.
    pub fn directives(&self, content: &str) -> Arc<DirectiveSet> {
        self.cache.get(content)
    }

    /// Cached directives for the prompt `prompt_id`, if present.
    pub fn directives_for(&self, prompt_id: &str, prompts: &[Prompt]) -> Option<Arc<DirectiveSet>> {
        find_prompt(prompts, prompt_id).map(|p| self.cache.get(&p.content))
    }

    /// Drops every cached parse, e.g. after the host swaps the prompt set.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Issues raised by enabling `prompt_id`.
    pub fn validate(&self, prompt_id: &str, prompts: &[Prompt]) -> Vec<Issue> {
        let issues = validation::validate(&self.cache, prompt_id, prompts);
        debug!(prompt_id = %prompt_id, issues = issues.len(), "Validated prompt");
        issues
    }

    /// Like [`validate`](Self::validate), reading prompts from the host.
    ///
    /// An unavailable prompt set yields no issues.
    pub fn validate_from<S>(&self, prompt_id: &str, source: &S) -> Vec<Issue>
    where
        S: PromptSource + ?Sized,
    {
        match source.list_prompts() {
            Ok(prompts) => self.validate(prompt_id, &prompts),
            Err(e) => {
                warn!(prompt_id = %prompt_id, error = %e, "Skipping validation");
                Vec::new()
            }
        }
    }

    /// Plan fixing every error in `issues` with `prompt_id`'s directives.
    pub fn resolution_plan(
        &self,
        issues: &[Issue],
        prompt_id: &str,
        prompts: &[Prompt],
    ) -> Option<ResolutionPlan> {
        let directives = self.directives_for(prompt_id, prompts)?;
        ResolutionPlan::for_issues(issues, &directives)
    }

    /// Returns true if every error in `issues` can be fixed silently.
    pub fn can_auto_resolve(&self, issues: &[Issue], prompt_id: &str, prompts: &[Prompt]) -> bool {
        self.resolution_plan(issues, prompt_id, prompts).is_some()
    }

    /// Applies the auto-resolution for `issues` through `sink`.
    ///
    /// The activating prompt itself is not toggled; that stays with the
    /// caller so it can be committed last.
    pub fn apply_auto_resolution<S: ToggleSink + ?Sized>(
        &self,
        issues: &[Issue],
        prompt_id: &str,
        prompts: &[Prompt],
        sink: &mut S,
    ) -> Result<ResolutionPlan> {
        let plan = self
            .resolution_plan(issues, prompt_id, prompts)
            .ok_or_else(|| EngineError::NotResolvable(prompt_id.to_string()))?;
        plan.apply(sink)?;
        Ok(plan)
    }

    /// Transitions due at `message_count`.
    pub fn evaluate_triggers(&self, message_count: u32, prompts: &[Prompt]) -> TriggerReport {
        let report = triggers::evaluate(&self.cache, message_count, prompts);
        debug!(
            count = message_count,
            enable = report.to_enable.len(),
            disable = report.to_disable.len(),
            "Evaluated triggers"
        );
        report
    }

    /// Like [`evaluate_triggers`](Self::evaluate_triggers), reading from the host.
    ///
    /// An unavailable prompt set or counter yields an empty report.
    pub fn evaluate_triggers_from<H>(&self, host: &H) -> TriggerReport
    where
        H: PromptSource + MessageCounter + ?Sized,
    {
        let count = match host.current_message_count() {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Message count unavailable");
                return TriggerReport::default();
            }
        };
        match host.list_prompts() {
            Ok(prompts) => self.evaluate_triggers(count, &prompts),
            Err(e) => {
                warn!(error = %e, "Prompt set unavailable");
                TriggerReport::empty(count)
            }
        }
    }

    /// Returns true if `prompt_id` passes its display conditions.
    ///
    /// Unknown prompts are not visible.
    pub fn is_visible(&self, prompt_id: &str, prompts: &[Prompt]) -> bool {
        self.directives_for(prompt_id, prompts).is_some_and(|d| {
            visibility::is_visible(&d, prompts, self.config.active_api.as_deref())
        })
    }

    /// Prompts passing their display conditions, in prompt-set order.
    pub fn visible_prompts<'p>(&self, prompts: &'p [Prompt]) -> Vec<&'p Prompt> {
        prompts
            .iter()
            .filter(|p| {
                let directives = self.cache.get(&p.content);
                visibility::is_visible(&directives, prompts, self.config.active_api.as_deref())
            })
            .collect()
    }
}
