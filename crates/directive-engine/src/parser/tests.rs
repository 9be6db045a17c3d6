//! Tests for the directive parser.

use directive_models::{DirectiveSet, MessageRange};

use super::*;

#[test]
fn test_empty_content_yields_defaults() {
    assert_eq!(parse(""), DirectiveSet::default());
    assert_eq!(parse("just a normal prompt"), DirectiveSet::default());
}

#[test]
fn test_parse_is_idempotent() {
    let content = "{{// @requires a, b}}\n{{// @tags x}}\n{{// @message-range 3-9}}";
    assert_eq!(parse(content), parse(content));
}

#[test]
fn test_list_accumulates_across_blocks() {
    let set = parse("{{// @tags foo}}\nbody\n{{// @tags bar, baz}}");
    assert_eq!(set.tags, vec!["foo", "bar", "baz"]);
}

#[test]
fn test_scalar_last_write_wins() {
    let set = parse("{{// @tooltip first}}{{// @tooltip second}}");
    assert_eq!(set.tooltip.as_deref(), Some("second"));
}

#[test]
fn test_list_values_are_trimmed_and_empty_dropped() {
    let set = parse("{{//   @requires  a ,, b ,  }}");
    assert_eq!(set.requires, vec!["a", "b"]);
}

#[test]
fn test_keyword_is_case_sensitive() {
    let outcome = parse_with_diagnostics("{{// @REQUIRES a}}");
    assert!(outcome.directives.requires.is_empty());
    assert_eq!(outcome.unknown, vec!["@REQUIRES a"]);
}

#[test]
fn test_unknown_and_malformed_lines_are_ignored() {
    let outcome = parse_with_diagnostics(
        "{{// @frobnicate yes}}\n{{// @enable-at-message ten}}\n{{// @requires core}}",
    );

    assert_eq!(outcome.directives.requires, vec!["core"]);
    assert_eq!(outcome.directives.enable_at_message, None);
    assert_eq!(outcome.unknown, vec!["@frobnicate yes"]);
}

#[test]
fn test_plain_comments_are_not_reported() {
    let outcome = parse_with_diagnostics("{{// remember to keep this short }}");
    assert!(outcome.unknown.is_empty());
    assert!(outcome.directives.is_empty());
}

#[test]
fn test_multiline_block() {
    let set = parse("{{//\n  @category pacing\n  @max-one-per-category pacing\n  @hidden\n}}");

    assert_eq!(set.categories, vec!["pacing"]);
    assert_eq!(set.max_one_per_category.as_deref(), Some("pacing"));
    assert!(set.hidden);
}

#[test]
fn test_flags() {
    let set = parse("{{// @auto-enable-dependencies}}{{// @highlight}}{{// @hidden false}}");
    assert!(set.auto_enable_dependencies);
    assert!(set.highlight);
    assert!(!set.hidden);
}

#[test]
fn test_trigger_fields() {
    let set = parse(
        "{{// @enable-at-message 10}}\n\
         {{// @disable-at-message 20}}\n\
         {{// @message-range 5-}}\n\
         {{// @enable-after-message 3}}\n\
         {{// @disable-after-message 30}}",
    );

    assert_eq!(set.enable_at_message, Some(10));
    assert_eq!(set.disable_at_message, Some(20));
    assert_eq!(set.message_range, Some(MessageRange::open(5)));
    assert_eq!(set.enable_after_message, Some(3));
    assert_eq!(set.disable_after_message, Some(30));
    assert!(set.has_triggers());
}

#[test]
fn test_invalid_range_is_absent() {
    let set = parse("{{// @message-range 10-5}}");
    assert_eq!(set.message_range, None);
}

#[test]
fn test_presentation_and_help_fields() {
    let set = parse(
        "{{// @icon 🎭}}{{// @color #ff8800}}{{// @badge NEW}}\
         {{// @group Style}}{{// @group-description Writing style knobs}}\
         {{// @help Long help}}{{// @docs https://example.org/p}}\
         {{// @author sam}}{{// @version 1.2}}\
         {{// @example one}}{{// @example two}}{{// @changelog 1.2: tweaks}}",
    );

    assert_eq!(set.icon.as_deref(), Some("🎭"));
    assert_eq!(set.color.as_deref(), Some("#ff8800"));
    assert_eq!(set.badge.as_deref(), Some("NEW"));
    assert_eq!(set.group.as_deref(), Some("Style"));
    assert_eq!(set.group_description.as_deref(), Some("Writing style knobs"));
    assert_eq!(set.help.as_deref(), Some("Long help"));
    assert_eq!(set.docs.as_deref(), Some("https://example.org/p"));
    assert_eq!(set.author.as_deref(), Some("sam"));
    assert_eq!(set.version.as_deref(), Some("1.2"));
    assert_eq!(set.examples, vec!["one", "two"]);
    assert_eq!(set.changelog, vec!["1.2: tweaks"]);
}

#[test]
fn test_bare_deprecated_marks_prompt() {
    assert_eq!(parse("{{// @deprecated}}").deprecated.as_deref(), Some(""));
    assert_eq!(
        parse("{{// @deprecated use v2}}").deprecated.as_deref(),
        Some("use v2")
    );
}

#[test]
fn test_visibility_fields() {
    let set = parse("{{// @if-enabled a, b}}{{// @if-disabled c}}{{// @if-api openai, claude}}");
    assert_eq!(set.if_enabled, vec!["a", "b"]);
    assert_eq!(set.if_disabled, vec!["c"]);
    assert_eq!(set.if_api, vec!["openai", "claude"]);
}

#[test]
fn test_unterminated_block_is_ignored() {
    let set = parse("{{// @requires a");
    assert!(set.requires.is_empty());
}

#[test]
fn test_continuation_lines_extend_value() {
    let outcome = parse_with_diagnostics("{{// @help First line of help.\nSecond line of help.}}");

    assert_eq!(
        outcome.directives.help.as_deref(),
        Some("First line of help.\nSecond line of help.")
    );
    assert!(outcome.unknown.is_empty());
}

#[test]
fn test_continuation_stops_at_next_directive() {
    let set = parse(
        "{{//\n  @example Ask for a summary,\n    then a shorter one\n  \
         @tooltip Brief\n  replies\n  @hidden\n}}",
    );

    assert_eq!(set.examples, vec!["Ask for a summary", "then a shorter one"]);
    assert_eq!(set.tooltip.as_deref(), Some("Brief\nreplies"));
    assert!(set.hidden);
}

#[test]
fn test_text_after_unknown_directive_is_dropped() {
    let outcome = parse_with_diagnostics("{{// @frobnicate\nmore text\n@author sam}}");
    assert_eq!(outcome.unknown, vec!["@frobnicate"]);
    assert_eq!(outcome.directives.author.as_deref(), Some("sam"));
}
