//! Merging of exclusions and soft conflicts seen from both sides.

use directive_models::{Issue, PromptRef};

/// Merges duplicate `exclusive` and `soft-conflict` issues.
///
/// Two issues of the same symmetric type merge when their messages match or
/// when they name a common conflicting prompt. The merged issue keeps the
/// position of the first one and lists every conflicting prompt in
/// `conflicting_prompts`. Other issue types pass through untouched.
pub fn deduplicate(issues: Vec<Issue>) -> Vec<Issue> {
    let mut out: Vec<Issue> = Vec::with_capacity(issues.len());

    for issue in issues {
        if issue.issue_type.is_symmetric() {
            let existing = out.iter_mut().find(|e| {
                e.issue_type == issue.issue_type
                    && (e.message == issue.message
                        || issue.conflicting().iter().any(|p| e.references(&p.identifier)))
            });
            if let Some(existing) = existing {
                merge(existing, &issue);
                continue;
            }
        }
        out.push(issue);
    }

    out
}

fn merge(into: &mut Issue, from: &Issue) {
    let mut all: Vec<PromptRef> = into.conflicting().into_iter().cloned().collect();
    for prompt in from.conflicting() {
        if !all.iter().any(|p| p.identifier == prompt.identifier) {
            all.push(prompt.clone());
        }
    }
    into.conflicting_prompt = None;
    into.conflicting_prompts = all;
}

#[cfg(test)]
mod tests {
    use super::*;
    use directive_models::{IssueType, Severity};

    fn conflict(issue_type: IssueType, other: &str, message: &str) -> Issue {
        let current = PromptRef::new("a", "A");
        Issue::new(issue_type, Severity::Error, current, message, "@x")
            .with_conflicting_prompt(PromptRef::new(other, other.to_uppercase()))
    }

    #[test]
    fn test_same_prompt_from_both_sides_merges() {
        let issues = vec![
            conflict(IssueType::Exclusive, "b", "A vs B"),
            conflict(IssueType::Exclusive, "b", "A vs B"),
        ];

        let merged = deduplicate(issues);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].conflicting_prompt.is_none());
        assert_eq!(merged[0].conflicting_prompts.len(), 1);
        assert_eq!(merged[0].conflicting_prompts[0].identifier, "b");
    }

    #[test]
    fn test_identical_message_merges_distinct_prompts() {
        let issues = vec![
            conflict(IssueType::SoftConflict, "b", "same"),
            conflict(IssueType::SoftConflict, "c", "same"),
        ];

        let merged = deduplicate(issues);
        assert_eq!(merged.len(), 1);
        let ids: Vec<_> = merged[0].conflicting().iter().map(|p| p.identifier.clone()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_different_types_do_not_merge() {
        let issues = vec![
            conflict(IssueType::Exclusive, "b", "m"),
            conflict(IssueType::SoftConflict, "b", "m"),
        ];
        assert_eq!(deduplicate(issues).len(), 2);
    }

    #[test]
    fn test_non_symmetric_types_pass_through() {
        let issues = vec![
            conflict(IssueType::CategoryLimit, "b", "m"),
            conflict(IssueType::CategoryLimit, "b", "m"),
        ];
        assert_eq!(deduplicate(issues).len(), 2);
    }

    #[test]
    fn test_distinct_conflicts_stay_separate() {
        let issues = vec![
            conflict(IssueType::Exclusive, "b", "A vs B"),
            conflict(IssueType::Exclusive, "c", "A vs C"),
        ];
        let merged = deduplicate(issues);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].conflicting_prompt.is_some());
    }
}
