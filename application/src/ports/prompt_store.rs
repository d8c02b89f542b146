//! Prompt store port
//!
//! Named system prompts kept outside the application.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptStoreError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Invalid prompt name: {0:?}")]
    InvalidName(String),

    #[error("Prompt file {name} is invalid: {reason}")]
    Invalid { name: String, reason: String },

    #[error("I/O error on {name}: {reason}")]
    Io { name: String, reason: String },
}

/// Read-only source of system prompts
pub trait PromptStore: Send + Sync {
    /// Load the prompt text stored under `name`
    fn load(&self, name: &str) -> Result<String, PromptStoreError>;

    /// Names of all available prompts, sorted
    fn list(&self) -> Result<Vec<String>, PromptStoreError>;
}
