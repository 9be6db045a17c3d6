//! Locations and environment for the CLI.
//!
//! # Environment Variables
//!
//! - `DIRECTIVES_HOME`: Base directory (default `~/.prompt-directives`)
//! - `DIRECTIVES_FILE`: Prompt-set document (default `$DIRECTIVES_HOME/prompts.json`)
//! - `DIRECTIVES_API`: Active backend API for `@if-api`

use std::path::PathBuf;

/// Environment variable for the base directory.
pub const HOME_ENV: &str = "DIRECTIVES_HOME";

/// Default base directory name under home.
const DEFAULT_HOME_DIR: &str = ".prompt-directives";

const PROMPTS_FILE: &str = "prompts.json";

/// Base directory for CLI state.
///
/// Resolved from `DIRECTIVES_HOME`, then `~/.prompt-directives`, then
/// `.prompt-directives` in the current directory.
pub fn home_dir() -> PathBuf {
    std::env::var(HOME_ENV)
        .map(|p| expand(&p))
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_HOME_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR))
        })
}

/// Default prompt-set document.
pub fn default_prompts_file() -> PathBuf {
    home_dir().join(PROMPTS_FILE)
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    PathBuf::from(expanded)
}
