//! Error types for prompt-set storage.

use std::path::PathBuf;

use directive_engine::HostError;
use thiserror::Error;

/// Errors that can occur while loading or saving a prompt set.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the document.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the document.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the parent directory.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for a prompt set.
    #[error("invalid prompt set: {0}")]
    Json(#[from] serde_json::Error),

    /// Prompt not found in the document.
    #[error("prompt not found: {0}")]
    PromptNotFound(String),

    /// Two prompts share an identifier.
    #[error("duplicate prompt identifier: {0}")]
    DuplicateIdentifier(String),
}

impl From<StoreError> for HostError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PromptNotFound(id) => HostError::UnknownPrompt(id),
            err @ (StoreError::Read { .. } | StoreError::Json(_)) => {
                HostError::Unavailable(err.to_string())
            }
            other => HostError::Toggle(other.to_string()),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
