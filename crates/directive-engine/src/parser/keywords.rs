//! Declarative directive keyword table.
//!
//! Each entry maps a keyword to the `DirectiveSet` field it writes. The kind
//! of slot a field exposes decides how the value is parsed and merged.

use directive_models::{DirectiveSet, MessageRange};

/// Directive fields addressable from prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Tooltip,
    Help,
    Docs,
    Author,
    Version,
    Examples,
    Changelog,
    Deprecated,
    Requires,
    ExclusiveWith,
    ConflictsWith,
    MutualExclusiveGroup,
    MaxOnePerCategory,
    Categories,
    Tags,
    AutoDisable,
    AutoEnableDependencies,
    IfEnabled,
    IfDisabled,
    IfApi,
    Hidden,
    Icon,
    Color,
    Badge,
    Highlight,
    Group,
    GroupDescription,
    EnableAtMessage,
    DisableAtMessage,
    MessageRange,
    EnableAfterMessage,
    DisableAfterMessage,
}

/// Mutable view of one field, tagged with its merge strategy.
pub enum Slot<'a> {
    /// Comma-separated values appended on every occurrence.
    List(&'a mut Vec<String>),
    /// Free text; last occurrence wins, an empty value is ignored.
    Text(&'a mut Option<String>),
    /// Free text that may also appear bare.
    Note(&'a mut Option<String>),
    /// Base-10 integer; last valid occurrence wins.
    Int(&'a mut Option<u32>),
    /// Bare keyword sets the flag; `false`/`no`/`off` clears it.
    Flag(&'a mut bool),
    /// `start-end` or `start-`.
    Range(&'a mut Option<MessageRange>),
}

impl Field {
    /// Returns the slot this field occupies in `set`.
    pub fn slot(self, set: &mut DirectiveSet) -> Slot<'_> {
        match self {
            Field::Tooltip => Slot::Text(&mut set.tooltip),
            Field::Help => Slot::Text(&mut set.help),
            Field::Docs => Slot::Text(&mut set.docs),
            Field::Author => Slot::Text(&mut set.author),
            Field::Version => Slot::Text(&mut set.version),
            Field::Examples => Slot::List(&mut set.examples),
            Field::Changelog => Slot::List(&mut set.changelog),
            Field::Deprecated => Slot::Note(&mut set.deprecated),
            Field::Requires => Slot::List(&mut set.requires),
            Field::ExclusiveWith => Slot::List(&mut set.exclusive_with),
            Field::ConflictsWith => Slot::List(&mut set.conflicts_with),
            Field::MutualExclusiveGroup => Slot::Text(&mut set.mutual_exclusive_group),
            Field::MaxOnePerCategory => Slot::Text(&mut set.max_one_per_category),
            Field::Categories => Slot::List(&mut set.categories),
            Field::Tags => Slot::List(&mut set.tags),
            Field::AutoDisable => Slot::List(&mut set.auto_disable),
            Field::AutoEnableDependencies => Slot::Flag(&mut set.auto_enable_dependencies),
            Field::IfEnabled => Slot::List(&mut set.if_enabled),
            Field::IfDisabled => Slot::List(&mut set.if_disabled),
            Field::IfApi => Slot::List(&mut set.if_api),
            Field::Hidden => Slot::Flag(&mut set.hidden),
            Field::Icon => Slot::Text(&mut set.icon),
            Field::Color => Slot::Text(&mut set.color),
            Field::Badge => Slot::Text(&mut set.badge),
            Field::Highlight => Slot::Flag(&mut set.highlight),
            Field::Group => Slot::Text(&mut set.group),
            Field::GroupDescription => Slot::Text(&mut set.group_description),
            Field::EnableAtMessage => Slot::Int(&mut set.enable_at_message),
            Field::DisableAtMessage => Slot::Int(&mut set.disable_at_message),
            Field::MessageRange => Slot::Range(&mut set.message_range),
            Field::EnableAfterMessage => Slot::Int(&mut set.enable_after_message),
            Field::DisableAfterMessage => Slot::Int(&mut set.disable_after_message),
        }
    }
}

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    /// Keyword including the leading `@`.
    pub keyword: &'static str,
    pub field: Field,
}

impl Keyword {
    const fn new(keyword: &'static str, field: Field) -> Self {
        Self { keyword, field }
    }

    /// Returns the trimmed value if `line` starts with this keyword.
    ///
    /// The keyword must be followed by whitespace or end the line, so
    /// `@group` never matches `@group-description`.
    pub fn strip<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix(self.keyword)?;
        if rest.is_empty() {
            Some(rest)
        } else if rest.starts_with(char::is_whitespace) {
            Some(rest.trim())
        } else {
            None
        }
    }

    /// The literal prefix a valued occurrence starts with.
    pub fn prefix(&self) -> String {
        format!("{} ", self.keyword)
    }
}

/// Every recognised directive, in match order.
pub static KEYWORDS: &[Keyword] = &[
    Keyword::new("@tooltip", Field::Tooltip),
    Keyword::new("@help", Field::Help),
    Keyword::new("@docs", Field::Docs),
    Keyword::new("@author", Field::Author),
    Keyword::new("@version", Field::Version),
    Keyword::new("@example", Field::Examples),
    Keyword::new("@changelog", Field::Changelog),
    Keyword::new("@deprecated", Field::Deprecated),
    Keyword::new("@requires", Field::Requires),
    Keyword::new("@exclusive-with", Field::ExclusiveWith),
    Keyword::new("@conflicts-with", Field::ConflictsWith),
    Keyword::new("@mutual-exclusive-group", Field::MutualExclusiveGroup),
    Keyword::new("@max-one-per-category", Field::MaxOnePerCategory),
    Keyword::new("@category", Field::Categories),
    Keyword::new("@tags", Field::Tags),
    Keyword::new("@auto-disable", Field::AutoDisable),
    Keyword::new("@auto-enable-dependencies", Field::AutoEnableDependencies),
    Keyword::new("@if-enabled", Field::IfEnabled),
    Keyword::new("@if-disabled", Field::IfDisabled),
    Keyword::new("@if-api", Field::IfApi),
    Keyword::new("@hidden", Field::Hidden),
    Keyword::new("@icon", Field::Icon),
    Keyword::new("@color", Field::Color),
    Keyword::new("@badge", Field::Badge),
    Keyword::new("@highlight", Field::Highlight),
    Keyword::new("@group", Field::Group),
    Keyword::new("@group-description", Field::GroupDescription),
    Keyword::new("@enable-at-message", Field::EnableAtMessage),
    Keyword::new("@disable-at-message", Field::DisableAtMessage),
    Keyword::new("@message-range", Field::MessageRange),
    Keyword::new("@enable-after-message", Field::EnableAfterMessage),
    Keyword::new("@disable-after-message", Field::DisableAfterMessage),
];

/// Finds the first keyword matching `line`, with its value.
pub fn lookup(line: &str) -> Option<(&'static Keyword, &str)> {
    KEYWORDS
        .iter()
        .find_map(|kw| kw.strip(line).map(|value| (kw, value)))
}

/// Writes `value` into the slot for `field`.
///
/// Values that do not parse for the slot leave the record untouched.
pub fn apply(set: &mut DirectiveSet, field: Field, value: &str) {
    match field.slot(set) {
        Slot::List(list) => list.extend(split_list(value)),
        Slot::Text(text) => {
            if !value.is_empty() {
                *text = Some(value.to_string());
            }
        }
        Slot::Note(note) => *note = Some(value.to_string()),
        Slot::Int(int) => {
            if let Some(n) = parse_count(value) {
                *int = Some(n);
            }
        }
        Slot::Flag(flag) => {
            *flag = !matches!(value.to_ascii_lowercase().as_str(), "false" | "no" | "off" | "0")
        }
        Slot::Range(range) => {
            if let Some(r) = parse_range(value) {
                *range = Some(r);
            }
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

/// Parses `start-end` or the open-ended `start-`.
fn parse_range(value: &str) -> Option<MessageRange> {
    let (start, end) = value.split_once('-')?;
    let start = parse_count(start)?;
    let end = end.trim();
    if end.is_empty() {
        return Some(MessageRange::open(start));
    }
    let end = parse_count(end)?;
    (end >= start).then(|| MessageRange::closed(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique() {
        let mut seen = HashSet::new();
        for kw in KEYWORDS {
            assert!(seen.insert(kw.keyword), "duplicate keyword {}", kw.keyword);
        }

        let fields: HashSet<_> = KEYWORDS.iter().map(|kw| kw.field).collect();
        assert_eq!(fields.len(), KEYWORDS.len());
    }

    #[test]
    fn test_no_prefix_is_prefix_of_another() {
        for a in KEYWORDS {
            assert!(a.keyword.starts_with('@'));
            assert!(!a.keyword.contains(char::is_whitespace));
            for b in KEYWORDS {
                if a.keyword != b.keyword {
                    assert!(
                        !b.prefix().starts_with(&a.prefix()),
                        "{} shadows {}",
                        a.keyword,
                        b.keyword
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookup_requires_word_boundary() {
        let (kw, value) = lookup("@group-description Pacing prompts").unwrap();
        assert_eq!(kw.field, Field::GroupDescription);
        assert_eq!(value, "Pacing prompts");

        let (kw, value) = lookup("@group pacing").unwrap();
        assert_eq!(kw.field, Field::Group);
        assert_eq!(value, "pacing");

        assert!(lookup("@groups pacing").is_none());
        assert!(lookup("@Tooltip hi").is_none());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("5-10"), Some(MessageRange::closed(5, 10)));
        assert_eq!(parse_range("5 - 10"), Some(MessageRange::closed(5, 10)));
        assert_eq!(parse_range("7-"), Some(MessageRange::open(7)));
        assert_eq!(parse_range("10-5"), None);
        assert_eq!(parse_range("abc"), None);
        assert_eq!(parse_range("-5"), None);
    }

    #[test]
    fn test_apply_flag_values() {
        let mut set = DirectiveSet::default();
        apply(&mut set, Field::Hidden, "");
        assert!(set.hidden);
        apply(&mut set, Field::Hidden, "off");
        assert!(!set.hidden);
    }

    #[test]
    fn test_apply_int_ignores_garbage() {
        let mut set = DirectiveSet::default();
        apply(&mut set, Field::EnableAtMessage, "12");
        apply(&mut set, Field::EnableAtMessage, "soon");
        assert_eq!(set.enable_at_message, Some(12));
    }
}
