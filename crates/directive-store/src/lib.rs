//! File-backed prompt set for the directive engine.
//!
//! A prompt set is one JSON document holding the prompts, their enabled
//! flags and the conversation's message count. Every change is written
//! atomically (temp file, then rename) so a crash never leaves a torn file.
//!
//! # Example
//!
//! ```no_run
//! use directive_engine::{activate, DirectiveEngine, Resolution};
//! use directive_store::PromptStore;
//!
//! let mut store = PromptStore::open("/tmp/prompts.json").unwrap();
//! let engine = DirectiveEngine::default();
//!
//! let mut cancel =
//!     |_: &directive_models::PromptRef, _: &[directive_models::Issue]| Resolution::Cancel;
//! let outcome = activate(&engine, &mut store, &mut cancel, "pacing-slow").unwrap();
//! println!("{outcome:?}");
//! ```

pub mod atomic;
pub mod error;
pub mod prompt_store;

pub use error::{Result, StoreError};
pub use prompt_store::{PromptSetDocument, PromptStore};
