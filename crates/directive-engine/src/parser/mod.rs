//! Directive parser.
//!
//! Directives live in comment blocks of the form `{{// @keyword value}}`.
//! A block may span several lines; each trimmed `@` line is matched against
//! the keyword table and the first match wins. Lines without `@` continue the
//! value of the directive above them. Lines that look like directives
//! but match nothing are reported through [`parse_with_diagnostics`] and
//! otherwise ignored, so one bad line never spoils a prompt.

mod keywords;
#[cfg(test)]
mod tests;

use std::sync::LazyLock;

use directive_models::DirectiveSet;
use regex::Regex;

pub use self::keywords::{apply, lookup, Field, Keyword, Slot, KEYWORDS};

/// Matches one `{{// ... }}` block, capturing the inner text.
static BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{//(.*?)\}\}").expect("Invalid directive block regex"));

/// Parser output together with lines no keyword accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub directives: DirectiveSet,
    /// `@`-prefixed lines that matched no keyword, trimmed.
    pub unknown: Vec<String>,
}

/// Parses every directive block in `content`.
///
/// # Example
/// ```
/// use directive_engine::parse;
///
/// let set = parse("Be brief.\n{{// @requires tone-core, pacing}}\n{{// @tooltip Short replies}}");
/// assert_eq!(set.requires, vec!["tone-core", "pacing"]);
/// assert_eq!(set.tooltip.as_deref(), Some("Short replies"));
/// ```
pub fn parse(content: &str) -> DirectiveSet {
    parse_with_diagnostics(content).directives
}

/// Parses `content`, also returning unrecognised directive lines.
pub fn parse_with_diagnostics(content: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    if content.is_empty() {
        return outcome;
    }

    for block in BLOCK_REGEX.captures_iter(content) {
        let Some(inner) = block.get(1) else {
            continue;
        };

        let mut pending: Option<(&'static Keyword, String)> = None;
        for line in inner.as_str().trim().lines() {
            let line = line.trim();
            if !line.starts_with('@') {
                // continuation of the open directive, or plain comment text
                if let Some((_, value)) = pending.as_mut() {
                    value.push('\n');
                    value.push_str(line);
                }
                continue;
            }
            if let Some((keyword, value)) = pending.take() {
                apply(&mut outcome.directives, keyword.field, value.trim());
            }
            match lookup(line) {
                Some((keyword, value)) => pending = Some((keyword, value.to_string())),
                None => outcome.unknown.push(line.to_string()),
            }
        }
        if let Some((keyword, value)) = pending {
            apply(&mut outcome.directives, keyword.field, value.trim());
        }
    }

    outcome
}
