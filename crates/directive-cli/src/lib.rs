//! Command-line front end for prompt directives.
//!
//! Operates on a JSON prompt-set file through `directive-store`.

pub mod cli;
pub mod commands;
pub mod config;
