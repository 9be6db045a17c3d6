//! Auto-resolution of blocking issues.
//!
//! An activating prompt can fix its own issues silently when it declares
//! how: conflicts are switched off when every conflicting prompt is listed
//! in its `@auto-disable`, and missing requirements are switched on when it
//! declares `@auto-enable-dependencies`. Either every error is fixable or
//! none is attempted.

use directive_models::{DirectiveSet, Issue, IssueType};
use serde::Serialize;
use tracing::info;

use crate::error::HostError;
use crate::host::ToggleSink;

/// Toggles that satisfy a set of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionPlan {
    /// Conflicting prompts to switch off.
    pub to_disable: Vec<String>,
    /// Required prompts to switch on.
    pub to_enable: Vec<String>,
}

impl ResolutionPlan {
    /// Builds a plan resolving every error in `issues`, or `None` if any
    /// error cannot be resolved with `directives`.
    ///
    /// Warnings never block and are not acted on.
    pub fn for_issues(issues: &[Issue], directives: &DirectiveSet) -> Option<Self> {
        let mut plan = Self::default();

        for issue in issues.iter().filter(|i| i.is_error()) {
            match issue.issue_type {
                t if t.is_conflict() => {
                    let conflicting = issue.conflicting();
                    if conflicting.is_empty()
                        || !conflicting.iter().all(|p| directives.may_auto_disable(&p.identifier))
                    {
                        return None;
                    }
                    for prompt in conflicting {
                        push_unique(&mut plan.to_disable, &prompt.identifier);
                    }
                }
                IssueType::MissingDependency => {
                    let required = issue.required_prompt.as_ref()?;
                    if !directives.auto_enable_dependencies {
                        return None;
                    }
                    push_unique(&mut plan.to_enable, &required.identifier);
                }
                _ => return None,
            }
        }

        Some(plan)
    }

    /// Returns true if nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_disable.is_empty() && self.to_enable.is_empty()
    }

    /// Applies the plan: conflicts off first, then requirements on.
    pub fn apply<S: ToggleSink + ?Sized>(&self, sink: &mut S) -> Result<(), HostError> {
        for id in &self.to_disable {
            sink.set_enabled(id, false)?;
            info!(prompt_id = %id, "Auto-disabled conflicting prompt");
        }
        for id in &self.to_enable {
            sink.set_enabled(id, true)?;
            info!(prompt_id = %id, "Auto-enabled required prompt");
        }
        Ok(())
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

/// Returns true if every error in `issues` can be fixed with `directives`.
pub fn can_auto_resolve(issues: &[Issue], directives: &DirectiveSet) -> bool {
    ResolutionPlan::for_issues(issues, directives).is_some()
}
