//! Directive engine for prompt sets.
//!
//! Prompt authors embed `{{// @keyword value}}` blocks in prompt bodies to
//! declare metadata, dependencies, exclusions and message-count triggers.
//! This crate turns those blocks into decisions:
//!
//! - **parser**: Directive grammar and the declarative keyword table
//! - **cache**: Content-addressed memoization of parser output
//! - **validation**: Issues raised when a prompt is about to be enabled
//! - **resolution**: Silent fixes using the activating prompt's own directives
//! - **triggers**: Transitions driven by conversation length
//! - **visibility**: `@hidden` / `@if-*` display conditions
//! - **activation**: The full enable flow against a host
//! - **driver**: Idempotent trigger application on message events
//!
//! # Example
//!
//! ```
//! use directive_engine::{DirectiveEngine, EngineConfig};
//! use directive_models::{IssueType, Prompt};
//!
//! let engine = DirectiveEngine::new(EngineConfig::default());
//! let prompts = vec![
//!     Prompt::new("a", "Terse", ""),
//!     Prompt::new("b", "Verbose", "{{// @exclusive-with a}}").with_enabled(true),
//! ];
//!
//! let issues = engine.validate("a", &prompts);
//! assert!(issues.is_empty()); // "a" has no content to validate
//!
//! let issues = engine.validate("b", &[prompts[0].clone().with_enabled(true), prompts[1].clone()]);
//! assert_eq!(issues[0].issue_type, IssueType::Exclusive);
//! ```

pub mod activation;
pub mod cache;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod host;
pub mod parser;
pub mod resolution;
pub mod triggers;
pub mod validation;
pub mod visibility;

pub use activation::{activate, deactivate, ActivationOutcome};
pub use cache::{CacheStats, DirectiveCache};
pub use config::EngineConfig;
pub use driver::TriggerDriver;
pub use engine::DirectiveEngine;
pub use error::{EngineError, HostError, Result};
pub use host::{
    InMemoryHost, MessageCounter, PromptSource, Resolution, ResolutionPrompt, ToggleSink,
};
pub use parser::{parse, parse_with_diagnostics, ParseOutcome, KEYWORDS};
pub use resolution::ResolutionPlan;
