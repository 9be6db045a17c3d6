//! Validation of a prompt about to be enabled.
//!
//! Checks run in a fixed order so the output order is stable:
//!
//! 1. `@exclusive-with` on the activating prompt
//! 2. Reverse scan: enabled prompts that exclude the activating prompt
//! 3. `@requires`
//! 4. `@max-one-per-category`
//! 5. `@mutual-exclusive-group`
//! 6. `@conflicts-with`, forward and reverse
//! 7. `@deprecated`
//!
//! Exclusions and soft conflicts found from both sides are then merged by
//! [`deduplicate`].

mod dedup;

use std::sync::Arc;

use directive_models::{find_prompt, DirectiveSet, Issue, IssueType, Prompt, PromptRef, Severity};

use crate::cache::DirectiveCache;

pub use self::dedup::deduplicate;

/// Validates enabling `prompt_id` against the current prompt set.
///
/// Returns no issues when the prompt is absent or has no content.
pub fn validate(cache: &DirectiveCache, prompt_id: &str, prompts: &[Prompt]) -> Vec<Issue> {
    let Some(current) = find_prompt(prompts, prompt_id) else {
        return Vec::new();
    };
    if !current.has_content() {
        return Vec::new();
    }

    let validator = Validator {
        cache,
        prompts,
        current,
        current_ref: PromptRef::from(current),
        directives: cache.get(&current.content),
    };
    deduplicate(validator.run())
}

/// One validation pass over a prompt set.
struct Validator<'a> {
    cache: &'a DirectiveCache,
    prompts: &'a [Prompt],
    current: &'a Prompt,
    current_ref: PromptRef,
    directives: Arc<DirectiveSet>,
}

impl<'a> Validator<'a> {
    fn run(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_exclusive(&mut issues);
        self.check_reverse_exclusive(&mut issues);
        self.check_requires(&mut issues);
        self.check_category_limit(&mut issues);
        self.check_group(&mut issues);
        self.check_soft_conflicts(&mut issues);
        self.check_deprecated(&mut issues);
        issues
    }

    /// Enabled prompts other than the current one.
    fn others_enabled(&self) -> impl Iterator<Item = &'a Prompt> + '_ {
        self.prompts
            .iter()
            .filter(move |p| p.enabled && p.identifier != self.current.identifier)
    }

    /// The enabled prompt `id`, unless it is the current prompt.
    fn enabled_other(&self, id: &str) -> Option<&'a Prompt> {
        find_prompt(self.prompts, id)
            .filter(|p| p.enabled && p.identifier != self.current.identifier)
    }

    fn exclusive_issue(&self, other: &Prompt) -> Issue {
        Issue::new(
            IssueType::Exclusive,
            Severity::Error,
            self.current_ref.clone(),
            format!(
                "\"{}\" cannot be enabled while \"{}\" is active",
                self.current.display_name(),
                other.display_name()
            ),
            "@exclusive-with",
        )
        .with_conflicting_prompt(PromptRef::from(other))
    }

    fn soft_conflict_issue(&self, other: &Prompt) -> Issue {
        Issue::new(
            IssueType::SoftConflict,
            Severity::Warning,
            self.current_ref.clone(),
            format!(
                "\"{}\" may conflict with \"{}\"",
                self.current.display_name(),
                other.display_name()
            ),
            "@conflicts-with",
        )
        .with_conflicting_prompt(PromptRef::from(other))
    }

    fn check_exclusive(&self, issues: &mut Vec<Issue>) {
        for id in &self.directives.exclusive_with {
            if let Some(other) = self.enabled_other(id) {
                issues.push(self.exclusive_issue(other));
            }
        }
    }

    fn check_reverse_exclusive(&self, issues: &mut Vec<Issue>) {
        for other in self.others_enabled().filter(|p| p.has_content()) {
            let theirs = self.cache.get(&other.content);
            if theirs.exclusive_with.contains(&self.current.identifier) {
                issues.push(self.exclusive_issue(other));
            }
        }
    }

    fn check_requires(&self, issues: &mut Vec<Issue>) {
        let can_auto_enable = self.directives.auto_enable_dependencies;
        for id in &self.directives.requires {
            let issue = match find_prompt(self.prompts, id) {
                Some(required) if required.enabled => continue,
                Some(required) => Issue::new(
                    IssueType::MissingDependency,
                    Severity::Error,
                    self.current_ref.clone(),
                    format!(
                        "\"{}\" requires \"{}\" to be enabled",
                        self.current.display_name(),
                        required.display_name()
                    ),
                    "@requires",
                )
                .with_required_prompt(Some(PromptRef::from(required))),
                // Degrade to the raw id when the requirement is gone.
                None => Issue::new(
                    IssueType::MissingDependency,
                    Severity::Error,
                    self.current_ref.clone(),
                    format!(
                        "\"{}\" requires \"{}\", which is not in the prompt set",
                        self.current.display_name(),
                        id
                    ),
                    "@requires",
                ),
            };
            issues.push(issue.with_can_auto_enable(can_auto_enable));
        }
    }

    fn check_category_limit(&self, issues: &mut Vec<Issue>) {
        let Some(category) = self.directives.max_one_per_category.as_deref() else {
            return;
        };
        let members: Vec<&Prompt> = self
            .others_enabled()
            .filter(|p| p.has_content() && self.cache.get(&p.content).in_category(category))
            .collect();
        if members.is_empty() {
            return;
        }
        issues.push(
            Issue::new(
                IssueType::CategoryLimit,
                Severity::Error,
                self.current_ref.clone(),
                format!(
                    "\"{}\" allows only one enabled prompt in category \"{}\"; already enabled: {}",
                    self.current.display_name(),
                    category,
                    quoted_names(&members)
                ),
                "@max-one-per-category",
            )
            .with_conflicting_prompts(members.into_iter().map(PromptRef::from).collect()),
        );
    }

    fn check_group(&self, issues: &mut Vec<Issue>) {
        let Some(group) = self.directives.mutual_exclusive_group.as_deref() else {
            return;
        };
        let members: Vec<&Prompt> = self
            .others_enabled()
            .filter(|p| {
                p.has_content()
                    && self.cache.get(&p.content).mutual_exclusive_group.as_deref() == Some(group)
            })
            .collect();
        if members.is_empty() {
            return;
        }
        issues.push(
            Issue::new(
                IssueType::MutualExclusiveGroup,
                Severity::Error,
                self.current_ref.clone(),
                format!(
                    "\"{}\" is in exclusive group \"{}\"; already enabled: {}",
                    self.current.display_name(),
                    group,
                    quoted_names(&members)
                ),
                "@mutual-exclusive-group",
            )
            .with_conflicting_prompts(members.into_iter().map(PromptRef::from).collect()),
        );
    }

    fn check_soft_conflicts(&self, issues: &mut Vec<Issue>) {
        for id in &self.directives.conflicts_with {
            if let Some(other) = self.enabled_other(id) {
                issues.push(self.soft_conflict_issue(other));
            }
        }
        for other in self.others_enabled().filter(|p| p.has_content()) {
            let theirs = self.cache.get(&other.content);
            if theirs.conflicts_with.contains(&self.current.identifier) {
                issues.push(self.soft_conflict_issue(other));
            }
        }
    }

    fn check_deprecated(&self, issues: &mut Vec<Issue>) {
        let Some(note) = self.directives.deprecated.as_deref() else {
            return;
        };
        let mut message = format!("\"{}\" is deprecated", self.current.display_name());
        if !note.is_empty() {
            message.push_str(": ");
            message.push_str(note);
        }
        issues.push(Issue::new(
            IssueType::Deprecated,
            Severity::Warning,
            self.current_ref.clone(),
            message,
            "@deprecated",
        ));
    }
}

fn quoted_names(prompts: &[&Prompt]) -> String {
    prompts
        .iter()
        .map(|p| format!("\"{}\"", p.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}
