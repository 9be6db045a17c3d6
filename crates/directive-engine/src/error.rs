//! Error types for the directive engine.

use thiserror::Error;

/// Failures reported by host collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    /// The prompt set could not be read.
    #[error("prompt set unavailable: {0}")]
    Unavailable(String),

    /// The host does not know the prompt.
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Applying or persisting a toggle failed.
    #[error("toggle failed: {0}")]
    Toggle(String),
}

/// Errors that can occur in engine entry points that drive the host.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Host collaborator error.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Prompt not found in the prompt set.
    #[error("prompt not found: {0}")]
    PromptNotFound(String),

    /// Issues cannot be fixed with the prompt's own directives.
    #[error("issues for {0} cannot be auto-resolved")]
    NotResolvable(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
